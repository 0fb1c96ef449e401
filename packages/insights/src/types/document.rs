//! Document types: uploaded content awaiting or having undergone extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Origin-channel tag a user assigns to an uploaded document.
///
/// Used as a soft hint for insight categorization, never a hard constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    CustomerFeedback,
    FieldReports,
    AnalystTranscripts,
    MarketReports,
    PartnerInsights,
}

impl SourceType {
    /// All recognized source types.
    pub const ALL: [SourceType; 5] = [
        SourceType::CustomerFeedback,
        SourceType::FieldReports,
        SourceType::AnalystTranscripts,
        SourceType::MarketReports,
        SourceType::PartnerInsights,
    ];

    /// Wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::CustomerFeedback => "customer_feedback",
            SourceType::FieldReports => "field_reports",
            SourceType::AnalystTranscripts => "analyst_transcripts",
            SourceType::MarketReports => "market_reports",
            SourceType::PartnerInsights => "partner_insights",
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer_feedback" => Ok(SourceType::CustomerFeedback),
            "field_reports" => Ok(SourceType::FieldReports),
            "analyst_transcripts" => Ok(SourceType::AnalystTranscripts),
            "market_reports" => Ok(SourceType::MarketReports),
            "partner_insights" => Ok(SourceType::PartnerInsights),
            other => Err(format!("unknown source type: {other}")),
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing status of a document.
///
/// Starts at `Processing` on creation and is flipped to a terminal value
/// (`Processed` or `Error`) exactly once per extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Processing,
    Processed,
    Error,
}

impl DocumentStatus {
    /// Wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Processing => "processing",
            DocumentStatus::Processed => "processed",
            DocumentStatus::Error => "error",
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(DocumentStatus::Processing),
            "processed" => Ok(DocumentStatus::Processed),
            "error" => Ok(DocumentStatus::Error),
            other => Err(format!("unknown document status: {other}")),
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted document row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub owner_id: Uuid,

    /// Display name (the uploaded file name)
    pub name: String,

    pub source_type: SourceType,

    /// Path of the raw bytes in the object store, if stored
    pub object_path: Option<String>,

    /// Extracted or synthesized text content
    pub content: Option<String>,

    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a new document row.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub owner_id: Uuid,
    pub name: String,
    pub source_type: SourceType,
    pub object_path: Option<String>,
    pub content: Option<String>,
    pub status: DocumentStatus,
}

/// A file submitted through the upload flow, before persistence.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// File name as submitted (becomes the document display name)
    pub file_name: String,

    /// Declared MIME type, if the client sent one
    pub content_type: Option<String>,

    /// Raw file bytes
    pub bytes: Vec<u8>,

    pub source_type: SourceType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_type_round_trip() {
        for source in SourceType::ALL {
            assert_eq!(source.as_str().parse::<SourceType>().unwrap(), source);
        }
        assert!("spreadsheets".parse::<SourceType>().is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            DocumentStatus::Processing,
            DocumentStatus::Processed,
            DocumentStatus::Error,
        ] {
            assert_eq!(status.as_str().parse::<DocumentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&SourceType::MarketReports).unwrap();
        assert_eq!(json, "\"market_reports\"");

        let json = serde_json::to_string(&DocumentStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }
}
