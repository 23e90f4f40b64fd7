//! Test fixtures for creating test data.
//!
//! Payload shapes come from `cardsite::testing`; these helpers push them
//! through the HTTP surface.

use axum::http::StatusCode;
use serde_json::Value;

pub use cardsite::testing::{full_site, legacy_site, minimal_site};

use super::HttpClient;

/// Create a site via `POST /sites`, asserting it was accepted.
pub async fn create_site(client: &HttpClient, payload: &Value) -> Value {
    let result = client.post("/sites", payload).await;
    assert_eq!(
        result.status,
        StatusCode::CREATED,
        "create failed: {}",
        result.body
    );
    result.body
}

/// Slugs from `GET /sites`, in listed order.
pub async fn listed_slugs(client: &HttpClient) -> Vec<String> {
    let result = client.get("/sites").await;
    assert_eq!(result.status, StatusCode::OK);
    result
        .body
        .as_array()
        .expect("list is an array")
        .iter()
        .map(|s| s["slug"].as_str().unwrap_or_default().to_string())
        .collect()
}
