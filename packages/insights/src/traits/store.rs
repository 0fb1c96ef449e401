//! Storage traits for documents, insights, and raw file objects.
//!
//! The storage layer is split into focused traits for flexibility:
//! - `DocumentStore`: document rows and status transitions
//! - `InsightStore`: append-only insight rows
//! - `ObjectStore`: raw uploaded bytes
//! - `Store`: composite trait combining the two row stores

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::{Document, DocumentStatus, Insight, NewDocument, NewInsight};

/// Store for document rows.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document, assigning its id and timestamps.
    async fn insert_document(&self, new: NewDocument) -> Result<Document>;

    /// Get a document by id, scoped to its owner.
    async fn get_document(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Document>>;

    /// List an owner's documents, newest first.
    async fn list_documents(&self, owner_id: Uuid) -> Result<Vec<Document>>;

    /// Set a document's status and bump its updated timestamp.
    ///
    /// A no-op for ids that do not exist; status transitions are only
    /// ever made by the extraction pipeline.
    async fn update_status(&self, id: Uuid, status: DocumentStatus) -> Result<()>;

    /// Count an owner's documents.
    async fn count_documents(&self, owner_id: Uuid) -> Result<usize> {
        Ok(self.list_documents(owner_id).await?.len())
    }
}

/// Store for insight rows.
///
/// Insights are append-only; nothing updates or deletes them.
#[async_trait]
pub trait InsightStore: Send + Sync {
    /// Insert a batch of insights atomically.
    ///
    /// Either the whole batch lands or none of it does.
    async fn insert_insights(&self, batch: Vec<NewInsight>) -> Result<Vec<Insight>>;

    /// List an owner's insights, newest first.
    async fn list_insights(&self, owner_id: Uuid) -> Result<Vec<Insight>>;

    /// Count an owner's insights.
    async fn count_insights(&self, owner_id: Uuid) -> Result<usize> {
        Ok(self.list_insights(owner_id).await?.len())
    }
}

/// Store for raw uploaded bytes.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes at the given path, overwriting any existing object.
    async fn put_object(&self, path: &str, bytes: &[u8]) -> Result<()>;
}

/// Composite storage trait combining both row stores.
///
/// This is the main trait used by the pipeline.
pub trait Store: DocumentStore + InsightStore {}

// Blanket implementation: anything implementing both row stores is a Store
impl<T: DocumentStore + InsightStore> Store for T {}
