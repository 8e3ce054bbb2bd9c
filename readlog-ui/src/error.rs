//! Error types for the JSON API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::submission::SubmitError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Feedback provider not configured (503)
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Feedback provider failed (502)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// readlog-common error
    #[error("Common error: {0}")]
    Common(#[from] readlog_common::Error),
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(msg) => ApiError::BadRequest(msg),
            SubmitError::MissingApiKey => ApiError::Unavailable(err.to_string()),
            SubmitError::Feedback { .. } => ApiError::Upstream(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "NO_API_KEY", msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "FEEDBACK_FAILED", msg),
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMMON_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
