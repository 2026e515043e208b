use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Request-level failures, each mapped onto one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Heuristic or AI-judged rejection the user can correct.
    #[error("{0}")]
    InputRejected(String),

    /// The image provider refused the prompt on content grounds.
    #[error("{0}")]
    ContentPolicy(String),

    /// The request body is missing fields or carries unusable values.
    #[error("{0}")]
    MalformedRequest(String),

    #[error("Step index {index} is out of range for a plan with {count} steps")]
    StepOutOfRange { index: usize, count: usize },

    /// The AI provider timed out, failed, or answered with something unusable.
    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::InputRejected(_)
            | ServiceError::ContentPolicy(_)
            | ServiceError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::StepOutOfRange { .. } => StatusCode::NOT_FOUND,
            ServiceError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn upstream(detail: impl Into<String>) -> Self {
        ServiceError::UpstreamUnavailable(detail.into())
    }

    pub fn rejected(detail: impl Into<String>) -> Self {
        ServiceError::InputRejected(detail.into())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(%status, error = %self, "request failed");
        } else {
            tracing::info!(%status, error = %self, "request rejected");
        }
        let body = serde_json::json!({ "detail": self.to_string() });
        (status, Json(body)).into_response()
    }
}
