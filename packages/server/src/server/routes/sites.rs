//! Site CRUD and render routes.
//!
//! Handlers are thin: every rule lives in [`cardsite::SiteStore`], the
//! routes only pick status codes and shapes.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    Json,
};
use cardsite::{RenderPlan, Site, SiteSummary};
use serde_json::Value;

use crate::server::app::AppState;
use crate::server::error::ApiError;

/// `GET /sites`
pub async fn list_sites(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<SiteSummary>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// `GET /sites/:slug`
pub async fn get_site(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Site>, ApiError> {
    Ok(Json(state.store.get(&slug).await?))
}

/// `POST /sites`
pub async fn create_site(
    Extension(state): Extension<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Site>), ApiError> {
    let Json(payload) = payload?;
    let site = state.store.create(payload).await?;
    Ok((StatusCode::CREATED, Json(site)))
}

/// `PUT /sites/:slug` - full replacement, no merging
pub async fn replace_site(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Site>, ApiError> {
    let Json(payload) = payload?;
    Ok(Json(state.store.replace(&slug, payload).await?))
}

/// `GET /sites/:slug/render`
pub async fn render_site(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RenderPlan>, ApiError> {
    let site = state.store.get(&slug).await?;
    let plan = RenderPlan::for_site(&site);
    if plan.unsupported_count() > 0 {
        tracing::debug!(slug = %slug, unsupported = plan.unsupported_count(), "Rendering placeholders for unsupported cards");
    }
    Ok(Json(plan))
}
