//! Insight types: structured, model-derived observations.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest confidence the pipeline will persist.
pub const MIN_CONFIDENCE: i64 = 60;

/// Highest confidence the pipeline will persist.
pub const MAX_CONFIDENCE: i64 = 99;

/// Clamp a raw model confidence into the persisted range.
pub fn clamp_confidence(raw: i64) -> i32 {
    raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as i32
}

/// Category of an insight.
///
/// Derives `JsonSchema` so the LLM tool schema constrains the model to
/// exactly these four values; strict deserialization fails closed on
/// anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Feedback,
    Suggestion,
    Market,
    Partner,
}

impl InsightCategory {
    /// All categories, in display order.
    pub const ALL: [InsightCategory; 4] = [
        InsightCategory::Feedback,
        InsightCategory::Suggestion,
        InsightCategory::Market,
        InsightCategory::Partner,
    ];

    /// Wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::Feedback => "feedback",
            InsightCategory::Suggestion => "suggestion",
            InsightCategory::Market => "market",
            InsightCategory::Partner => "partner",
        }
    }
}

impl std::str::FromStr for InsightCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feedback" => Ok(InsightCategory::Feedback),
            "suggestion" => Ok(InsightCategory::Suggestion),
            "market" => Ok(InsightCategory::Market),
            "partner" => Ok(InsightCategory::Partner),
            other => Err(format!("unknown insight category: {other}")),
        }
    }
}

impl std::fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted insight row.
///
/// Created exclusively by the extraction pipeline, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category: InsightCategory,

    /// Short insight title (the prompt asks for at most 10 words)
    pub title: String,

    /// 1-2 sentence actionable summary
    pub summary: String,

    /// Source labels; the pipeline seeds this with the originating
    /// document's display name, so it is never empty
    pub sources: Vec<String>,

    /// Always within [MIN_CONFIDENCE, MAX_CONFIDENCE]
    pub confidence: i32,

    /// Originating document ids
    pub document_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
}

/// Input for inserting a new insight row.
#[derive(Debug, Clone)]
pub struct NewInsight {
    pub owner_id: Uuid,
    pub category: InsightCategory,
    pub title: String,
    pub summary: String,
    pub sources: Vec<String>,
    pub confidence: i32,
    pub document_ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_confidence() {
        assert_eq!(clamp_confidence(40), 60);
        assert_eq!(clamp_confidence(60), 60);
        assert_eq!(clamp_confidence(85), 85);
        assert_eq!(clamp_confidence(99), 99);
        assert_eq!(clamp_confidence(150), 99);
        assert_eq!(clamp_confidence(-5), 60);
    }

    #[test]
    fn test_category_round_trip() {
        for category in InsightCategory::ALL {
            assert_eq!(category.as_str().parse::<InsightCategory>().unwrap(), category);
        }
        assert!("roadmap".parse::<InsightCategory>().is_err());
    }

    #[test]
    fn test_category_rejects_unknown_in_json() {
        let err = serde_json::from_str::<InsightCategory>("\"roadmap\"");
        assert!(err.is_err());
    }
}
