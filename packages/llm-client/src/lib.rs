//! Minimal client for OpenAI-compatible chat completion APIs.
//!
//! A clean REST client with no domain-specific logic, focused on function
//! calling (tool use) with strict, schema-constrained arguments. Works
//! against the OpenAI API or any gateway that speaks the same protocol.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::{FunctionRequest, LlmClient, Message, ToolArguments, ToolDefinition};
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Findings {
//!     items: Vec<String>,
//! }
//!
//! let client = LlmClient::from_env()?;
//! let request = FunctionRequest::new(
//!     "gpt-4o-mini",
//!     vec![Message::system("Extract findings"), Message::user(text)],
//!     vec![ToolDefinition::new("report", "Report findings", Findings::tool_schema())],
//! )
//! .force_tool("report");
//!
//! let response = client.function_calling(request).await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{LlmError, Result};
pub use schema::ToolArguments;
pub use types::{
    FunctionRequest, FunctionResponse, Message, ToolChoice, ToolDefinition, ToolInvocation,
};

use reqwest::Client;
use tracing::{debug, warn};

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct LlmClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from the `LLM_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .map_err(|_| LlmError::Config("LLM_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for gateways and proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Function calling (tool use).
    ///
    /// Sends messages with tool definitions and returns tool calls or
    /// content. Rate-limit and quota responses map to dedicated errors so
    /// callers can surface them with their original status codes.
    pub async fn function_calling(&self, request: FunctionRequest) -> Result<FunctionResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "LLM request failed");
                LlmError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "LLM API error");
            return Err(match status.as_u16() {
                429 => LlmError::RateLimited,
                402 => LlmError::QuotaExhausted,
                code => LlmError::Api {
                    status: code,
                    message: error_text,
                },
            });
        }

        let raw: types::FunctionResponseRaw = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "LLM tool call completed"
        );

        Ok(raw.into())
    }
}
