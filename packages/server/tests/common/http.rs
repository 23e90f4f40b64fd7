//! HTTP client for integration testing.
//!
//! Drives requests through the router with `oneshot`, without binding a port.

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

/// Client for executing requests against the app in tests.
pub struct HttpClient {
    app: Router,
}

/// Result of a request.
#[derive(Debug)]
pub struct HttpResult {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` when the body is empty or not JSON.
    pub body: Value,
}

impl HttpClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    pub async fn get(&self, uri: &str) -> HttpResult {
        self.send(Method::GET, uri, Body::empty(), None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> HttpResult {
        self.send(Method::POST, uri, Body::from(body.to_string()), Some("application/json"))
            .await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> HttpResult {
        self.send(Method::PUT, uri, Body::from(body.to_string()), Some("application/json"))
            .await
    }

    /// Send a raw body, e.g. to exercise malformed JSON handling.
    pub async fn post_raw(&self, uri: &str, raw: &str) -> HttpResult {
        self.send(Method::POST, uri, Body::from(raw.to_string()), Some("application/json"))
            .await
    }

    pub async fn request(&self, request: Request<Body>) -> HttpResult {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        HttpResult {
            status,
            headers,
            body,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> HttpResult {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.request(builder.body(body).expect("valid request")).await
    }
}
