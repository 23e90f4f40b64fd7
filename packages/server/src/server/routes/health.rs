use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    storage: StorageHealth,
}

#[derive(Serialize)]
pub struct StorageHealth {
    status: String,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sites: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct ApiStatus {
    status: &'static str,
}

/// Liveness probe: `{"status": "API running"}`
pub async fn api_status_handler() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "API running",
    })
}

/// Health check endpoint
///
/// Reads the stored collection end to end (load, normalize, decode).
/// Returns 200 OK if it is readable, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let location = state.store.storage().describe();

    let storage = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        state.store.list(),
    )
    .await
    {
        Ok(Ok(sites)) => StorageHealth {
            status: "ok".to_string(),
            location,
            sites: Some(sites.len()),
            error: None,
        },
        Ok(Err(e)) => StorageHealth {
            status: "error".to_string(),
            location,
            sites: None,
            error: Some(e.to_string()),
        },
        Err(_) => StorageHealth {
            status: "error".to_string(),
            location,
            sites: None,
            error: Some("Read timeout (>5s)".to_string()),
        },
    };

    let is_healthy = storage.status == "ok";

    let overall_status = if is_healthy {
        "healthy"
    } else {
        "unhealthy"
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            storage,
        }),
    )
}
