//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all request/response endpoints.
//! It implements `axum::response::IntoResponse` to produce structured JSON
//! error responses with appropriate HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use gosh_storage::StorageError;

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Entity not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed body, missing parameter, or unparseable id (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A streaming endpoint was called without a protocol upgrade (426).
    #[error("upgrade required: {0}")]
    UpgradeRequired(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UpgradeRequired(_) => StatusCode::UPGRADE_REQUIRED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::UpgradeRequired(_) => "UPGRADE_REQUIRED",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::UpgradeRequired(msg)
            | ApiError::InternalError(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = ApiErrorDetail {
            code: self.code().to_string(),
            message: self.message().to_string(),
        };

        let body = serde_json::json!({
            "success": false,
            "error": detail,
        });

        (self.status(), axum::Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::ProgramNotFound(_) => ApiError::NotFound(err.to_string()),
            _ => ApiError::InternalError(err.to_string()),
        }
    }
}
