//! Model trait for LLM-backed insight extraction.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::InsightCategory;

/// A fully rendered prompt for one extraction call.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightPrompt {
    /// System instruction framing the extractor and the preferred category
    pub system: String,

    /// User message carrying the (truncated) document content
    pub user: String,
}

/// One insight as returned by the model, before validation.
///
/// Strict deserialization: an unknown category, a missing field, or an
/// extra field all fail closed rather than producing a partial insight.
/// Confidence is taken as the model sent it and clamped later.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RawInsight {
    pub category: InsightCategory,
    pub title: String,
    pub summary: String,
    pub confidence: i64,
}

/// Model trait for insight extraction.
///
/// Implementations wrap a specific LLM provider and handle prompting and
/// response parsing; the pipeline stays provider-agnostic.
#[async_trait]
pub trait InsightModel: Send + Sync {
    /// Extract 1-3 structured insights from a rendered prompt.
    ///
    /// The preferred category embedded in the prompt is a soft hint; the
    /// returned insights may use any [`InsightCategory`].
    async fn extract_insights(&self, prompt: &InsightPrompt) -> Result<Vec<RawInsight>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_insight_strict_deserialization() {
        let ok: RawInsight = serde_json::from_str(
            r#"{"category":"market","title":"t","summary":"s","confidence":80}"#,
        )
        .unwrap();
        assert_eq!(ok.category, InsightCategory::Market);

        // Unknown category fails closed
        assert!(serde_json::from_str::<RawInsight>(
            r#"{"category":"roadmap","title":"t","summary":"s","confidence":80}"#,
        )
        .is_err());

        // Missing field fails closed
        assert!(serde_json::from_str::<RawInsight>(
            r#"{"category":"market","title":"t","confidence":80}"#,
        )
        .is_err());

        // Extra field fails closed
        assert!(serde_json::from_str::<RawInsight>(
            r#"{"category":"market","title":"t","summary":"s","confidence":80,"tags":[]}"#,
        )
        .is_err());
    }

    #[test]
    fn test_out_of_range_confidence_still_parses() {
        // Range enforcement happens at the validation step, not here
        let raw: RawInsight = serde_json::from_str(
            r#"{"category":"feedback","title":"t","summary":"s","confidence":150}"#,
        )
        .unwrap();
        assert_eq!(raw.confidence, 150);
    }
}
