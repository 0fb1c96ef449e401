//! Prompt construction for insight extraction.

use crate::traits::ai::InsightPrompt;
use crate::types::{Document, InsightCategory, SourceType};

/// Bound on document content included in the prompt, to respect
/// request-size limits. Longer content is truncated, not rejected.
pub const MAX_PROMPT_CONTENT_BYTES: usize = 8000;

/// System prompt template. The source type and preferred category are a
/// soft bias only; the tool schema still allows any category.
const SYSTEM_PROMPT_TEMPLATE: &str = r#"You are a product management AI assistant. You analyze documents uploaded by product managers and extract actionable insights.

Given a document, generate 1-3 structured insights. Each insight must have:
- category: one of "feedback", "suggestion", "market", "partner"
- title: concise insight title (max 10 words)
- summary: 1-2 sentence actionable summary
- confidence: integer 60-99 representing how confident you are

The document source type is "{source_type}" so prefer category "{preferred_category}".

Respond using the extract_insights tool."#;

/// Fixed source-type to preferred-category mapping.
///
/// The enum is closed, so the mapping is total by construction; a newly
/// added source type forces an explicit choice here at compile time.
pub fn preferred_category(source_type: SourceType) -> InsightCategory {
    match source_type {
        SourceType::CustomerFeedback | SourceType::FieldReports => InsightCategory::Feedback,
        SourceType::AnalystTranscripts => InsightCategory::Suggestion,
        SourceType::MarketReports => InsightCategory::Market,
        SourceType::PartnerInsights => InsightCategory::Partner,
    }
}

/// Build the extraction prompt for a document.
///
/// Documents without content fall back to a bare name marker so the model
/// still has something to work from.
pub fn build_prompt(document: &Document) -> InsightPrompt {
    let preferred = preferred_category(document.source_type);
    let system = SYSTEM_PROMPT_TEMPLATE
        .replace("{source_type}", document.source_type.as_str())
        .replace("{preferred_category}", preferred.as_str());

    let fallback;
    let content = match document.content.as_deref() {
        Some(content) => content,
        None => {
            fallback = format!("[Document: {}]", document.name);
            &fallback
        }
    };

    let user = format!(
        "Analyze this document and extract insights:\n\n{}",
        truncate_to_char_boundary(content, MAX_PROMPT_CONTENT_BYTES)
    );

    InsightPrompt { system, user }
}

/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::types::DocumentStatus;

    fn document(source_type: SourceType, content: Option<&str>) -> Document {
        let now = Utc::now();
        Document {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "notes.txt".to_string(),
            source_type,
            object_path: None,
            content: content.map(str::to_string),
            status: DocumentStatus::Processing,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_preferred_category_mapping() {
        assert_eq!(
            preferred_category(SourceType::CustomerFeedback),
            InsightCategory::Feedback
        );
        assert_eq!(
            preferred_category(SourceType::FieldReports),
            InsightCategory::Feedback
        );
        assert_eq!(
            preferred_category(SourceType::AnalystTranscripts),
            InsightCategory::Suggestion
        );
        assert_eq!(
            preferred_category(SourceType::MarketReports),
            InsightCategory::Market
        );
        assert_eq!(
            preferred_category(SourceType::PartnerInsights),
            InsightCategory::Partner
        );
    }

    #[test]
    fn test_prompt_embeds_preference() {
        let prompt = build_prompt(&document(SourceType::MarketReports, Some("Q3 numbers")));
        assert!(prompt.system.contains("\"market_reports\""));
        assert!(prompt.system.contains("prefer category \"market\""));
        assert!(prompt.user.contains("Q3 numbers"));
    }

    #[test]
    fn test_prompt_truncates_long_content() {
        let long = "x".repeat(MAX_PROMPT_CONTENT_BYTES * 2);
        let prompt = build_prompt(&document(SourceType::CustomerFeedback, Some(&long)));
        let prefix = "Analyze this document and extract insights:\n\n";
        assert_eq!(prompt.user.len(), prefix.len() + MAX_PROMPT_CONTENT_BYTES);
    }

    #[test]
    fn test_prompt_without_content_uses_name_marker() {
        let prompt = build_prompt(&document(SourceType::CustomerFeedback, None));
        assert!(prompt.user.contains("[Document: notes.txt]"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "héllo wörld";
        let truncated = truncate_to_char_boundary(text, 3);
        assert!(truncated.len() <= 3);
        assert!(text.starts_with(truncated));
    }
}
