//! Error types for the LLM client.

use thiserror::Error;

/// Result type for LLM client operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// LLM client errors.
///
/// Rate-limit (429) and quota-exhaustion (402) responses get their own
/// variants because callers surface them with distinct HTTP status codes.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration error (missing API key, invalid base URL)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// Upstream returned 429
    #[error("rate limited by upstream")]
    RateLimited,

    /// Upstream returned 402
    #[error("upstream credits exhausted")]
    QuotaExhausted,

    /// Any other non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid JSON or unexpected response shape
    #[error("parse error: {0}")]
    Parse(String),
}
