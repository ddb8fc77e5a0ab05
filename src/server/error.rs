//! HTTP error responses
//!
//! Handlers return `Result<_, ApiError>`. Domain failures arrive as
//! `anyhow::Error` and are mapped to a status code by downcasting to
//! [`TodoError`]; the body is always `{"detail": "..."}`.

use crate::error::TodoError;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error response returned by the request handlers
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status to send
    pub status: StatusCode,
    /// Human-readable reason placed in the `detail` field
    pub detail: String,
}

impl ApiError {
    /// Build an error with an explicit status and detail
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<TodoError>() {
            Some(TodoError::NotFound { id }) => {
                tracing::info!(id, "ToDo not found");
                Self::new(StatusCode::NOT_FOUND, "ToDo not found")
            }
            Some(TodoError::Validation(message)) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message.clone())
            }
            _ => {
                tracing::error!(error = ?err, "Request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected form body");
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
