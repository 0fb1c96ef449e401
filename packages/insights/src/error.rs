//! Typed errors for the insight pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in the upload flow and extraction pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invalid input (missing document id, missing API key)
    #[error("validation error: {0}")]
    Validation(String),

    /// Document does not exist or is not owned by the caller
    #[error("document not found: {document_id}")]
    NotFound { document_id: Uuid },

    /// LLM endpoint returned 429
    #[error("upstream rate limited")]
    RateLimited,

    /// LLM endpoint returned 402
    #[error("upstream credits exhausted")]
    QuotaExhausted,

    /// Any other LLM endpoint failure
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Model response missing the expected structured payload
    #[error("parse error: {0}")]
    Parse(String),

    /// Row insert/update or object-store failure
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PipelineError {
    /// Wrap an arbitrary error as a storage failure.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
