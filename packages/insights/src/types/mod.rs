//! Core data types for documents and insights.

pub mod document;
pub mod insight;

pub use document::{Document, DocumentStatus, DocumentUpload, NewDocument, SourceType};
pub use insight::{
    clamp_confidence, Insight, InsightCategory, NewInsight, MAX_CONFIDENCE, MIN_CONFIDENCE,
};
