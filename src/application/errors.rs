use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::domain::errors::FetchError;

/// Error returned by JSON API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Credentials for the upstream APIs are not configured.
    pub fn setup_required(missing: &[&str]) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("missing required secrets: {}", missing.join(", ")),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        let status = match &err {
            FetchError::NotFound { .. } => StatusCode::NOT_FOUND,
            FetchError::Upstream(_) | FetchError::Validation(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "api request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
