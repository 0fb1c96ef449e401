//! [`InsightModel`] implementation backed by an OpenAI-compatible endpoint.
//!
//! Uses forced function calling so the response is machine-parseable: the
//! model must answer through the `extract_insights` tool, whose argument
//! schema is generated from [`RawInsight`] itself.

use async_trait::async_trait;
use llm_client::{
    FunctionRequest, LlmClient, LlmError, Message, ToolArguments, ToolDefinition,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::traits::ai::{InsightModel, InsightPrompt, RawInsight};

const TOOL_NAME: &str = "extract_insights";

/// Tool argument payload: the schema sent to the model and the shape its
/// reply must deserialize into. Strict on both ends.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct ExtractInsightsArgs {
    insights: Vec<RawInsight>,
}

/// Insight model backed by a chat completions endpoint with tool calling.
pub struct GatewayModel {
    client: LlmClient,
    model: String,
}

impl GatewayModel {
    /// Create a model wrapper for the given client and model name.
    pub fn new(client: LlmClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl InsightModel for GatewayModel {
    async fn extract_insights(&self, prompt: &InsightPrompt) -> Result<Vec<RawInsight>> {
        let request = FunctionRequest::new(
            &self.model,
            vec![
                Message::system(&prompt.system),
                Message::user(&prompt.user),
            ],
            vec![ToolDefinition::new(
                TOOL_NAME,
                "Extract structured insights from a document",
                ExtractInsightsArgs::tool_schema(),
            )],
        )
        .force_tool(TOOL_NAME);

        let response = self
            .client
            .function_calling(request)
            .await
            .map_err(map_client_error)?;

        let call = response
            .tool_calls
            .into_iter()
            .find(|c| c.name == TOOL_NAME)
            .ok_or_else(|| PipelineError::Parse("no tool call in model response".to_string()))?;

        let args: ExtractInsightsArgs = serde_json::from_str(&call.arguments)
            .map_err(|e| PipelineError::Parse(format!("invalid tool arguments: {e}")))?;

        debug!(model = %self.model, insights = args.insights.len(), "model returned insights");
        Ok(args.insights)
    }
}

fn map_client_error(err: LlmError) -> PipelineError {
    match err {
        LlmError::RateLimited => PipelineError::RateLimited,
        LlmError::QuotaExhausted => PipelineError::QuotaExhausted,
        LlmError::Parse(msg) => PipelineError::Parse(msg),
        LlmError::Config(msg) => PipelineError::Validation(msg),
        LlmError::Network(msg) => PipelineError::Upstream(msg),
        LlmError::Api { status, message } => {
            PipelineError::Upstream(format!("status {status}: {message}"))
        }
    }
}
