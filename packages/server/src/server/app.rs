//! Application setup and server configuration.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use cardsite::{JsonFileStorage, SchemaError, SiteStorage, SiteStore, SiteValidator};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{
    api_status_handler, create_site, get_site, health_handler, list_sites, render_site,
    replace_site,
};

/// Site store as the handlers see it: any backend behind a shared handle.
pub type SharedStore = SiteStore<Arc<dyn SiteStorage>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SharedStore>,
}

impl AppState {
    pub fn new(storage: Arc<dyn SiteStorage>, validator: Arc<SiteValidator>) -> Self {
        Self {
            store: Arc::new(SiteStore::new(storage, validator)),
        }
    }

    /// File-backed state built from configuration.
    pub fn from_config(config: &Config) -> Result<Self, SchemaError> {
        let validator = Arc::new(load_validator(config.schema_dir.as_deref())?);
        let storage: Arc<dyn SiteStorage> = Arc::new(JsonFileStorage::new(&config.sites_file));
        Ok(Self::new(storage, validator))
    }
}

/// Compile the schemas once, from `schema_dir` when given, otherwise the
/// copies bundled into the binary.
pub fn load_validator(schema_dir: Option<&Path>) -> Result<SiteValidator, SchemaError> {
    match schema_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Loading schemas from directory");
            SiteValidator::from_dir(dir)
        }
        None => SiteValidator::bundled(),
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/sites", get(list_sites).post(create_site))
        .route("/sites/:slug", get(get_site).put(replace_site))
        .route("/sites/:slug/render", get(render_site))
        // Liveness and storage health
        .route("/api", get(api_status_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
