//! Document Insight Extraction Library
//!
//! Turns uploaded product-management documents (feedback, transcripts,
//! market reports) into structured insights via an external language model.
//!
//! # Design
//!
//! - Storage, model, and trigger sit behind traits; the pipeline only sees
//!   abstractions, so it runs identically against Postgres or in-memory
//!   stores and against a real gateway or a mock model.
//! - The model's output is schema-constrained (tool calling) and parsed
//!   strictly: unknown categories or malformed items fail closed.
//! - Extraction is stateless per call. Re-invoking it for the same
//!   document appends another insight batch; that is the manual retry
//!   story, and concurrent calls are allowed to race.
//! - Any failure flips the document to `error` (best effort) so nothing
//!   stays stuck in `processing`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use insights::{run_extraction, upload_document, MemoryStore};
//! use insights::testing::{MockModel, RecordingTrigger};
//!
//! let store = MemoryStore::new();
//! let model = MockModel::new();
//! let trigger = RecordingTrigger::new();
//!
//! let document = upload_document(&store, &store, &trigger, owner, upload).await?;
//! let outcome = run_extraction(&store, &model, owner, document.id).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (stores, model, trigger)
//! - [`types`] - Document and insight data types
//! - [`pipeline`] - Upload flow, prompts, and the extraction function
//! - [`stores`] - Storage implementations (memory, filesystem, Postgres)
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "llm")]
pub mod ai;

// Re-export core types at crate root
pub use error::{PipelineError, Result};
pub use traits::{
    ai::{InsightModel, InsightPrompt, RawInsight},
    store::{DocumentStore, InsightStore, ObjectStore, Store},
    trigger::ExtractionTrigger,
};
pub use types::{
    clamp_confidence, Document, DocumentStatus, DocumentUpload, Insight, InsightCategory,
    NewDocument, NewInsight, SourceType, MAX_CONFIDENCE, MIN_CONFIDENCE,
};

// Re-export pipeline entry points
pub use pipeline::{
    build_prompt, derive_content, preferred_category, run_extraction, upload_document,
    ExtractionOutcome, MAX_PROMPT_CONTENT_BYTES,
};

// Re-export stores
pub use stores::{FsObjectStore, MemoryStore};

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;

#[cfg(feature = "llm")]
pub use ai::GatewayModel;
