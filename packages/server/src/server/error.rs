//! HTTP error mapping for pipeline failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use insights::PipelineError;

/// API error carrying an HTTP status and a client-safe message.
///
/// Serialized as `{ "error": "<message>" }`. Rate-limit and quota
/// failures keep their upstream status codes (429, 402) so clients can
/// distinguish them; everything unexpected collapses to 500.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let status = match &err {
            PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
            PipelineError::NotFound { .. } => StatusCode::NOT_FOUND,
            PipelineError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            PipelineError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            PipelineError::Upstream(_)
            | PipelineError::Parse(_)
            | PipelineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
