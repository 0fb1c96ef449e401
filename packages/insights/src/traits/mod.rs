//! Core trait abstractions for storage, the model, and extraction triggers.

pub mod ai;
pub mod store;
pub mod trigger;

pub use ai::{InsightModel, InsightPrompt, RawInsight};
pub use store::{DocumentStore, InsightStore, ObjectStore, Store};
pub use trigger::ExtractionTrigger;
