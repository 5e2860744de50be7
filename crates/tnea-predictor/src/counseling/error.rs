use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use super::offerings::RepositoryError;

/// Error raised by the counseling service and surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum CounselingError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl CounselingError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CounselingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CounselingError::NotFound(_) => StatusCode::NOT_FOUND,
            CounselingError::ServiceUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for CounselingError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Unavailable(detail) => Self::ServiceUnavailable(detail),
        }
    }
}

impl From<JsonRejection> for CounselingError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl IntoResponse for CounselingError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            CounselingError::ServiceUnavailable(detail) => {
                error!(%detail, "store call failed");
                "Server Error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
