//! HTTP error mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardsite::{StoreError, ValidationIssue};
use serde::Serialize;
use thiserror::Error;

/// Errors a handler can return; each maps to one status and JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Request body was not parseable JSON
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [ValidationIssue]>,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::Invalid(_)) | ApiError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(StoreError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let malformed;
        let (error, details) = match &self {
            ApiError::Store(StoreError::NotFound { .. }) => ("Site not found", None),
            ApiError::Store(StoreError::Conflict { .. }) => ("Slug already exists", None),
            ApiError::Store(StoreError::Invalid(issues)) => {
                ("Invalid site payload", Some(issues.as_slice()))
            }
            ApiError::MalformedBody(message) => {
                malformed = [ValidationIssue::new("", message.clone())];
                ("Invalid site payload", Some(&malformed[..]))
            }
            ApiError::Store(StoreError::Storage(e)) => {
                tracing::error!(error = %e, "Storage failure");
                ("Storage failure", None)
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}
