//! Trigger abstraction for requesting extraction after an upload.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;

/// Requests extraction for a freshly uploaded document.
///
/// The upload flow treats this as fire-and-forget: a trigger failure is
/// logged as a warning and never rolls back the upload, since the document
/// and file are already durably persisted. Implementations may run the
/// pipeline inline or spawn it in the background.
#[async_trait]
pub trait ExtractionTrigger: Send + Sync {
    async fn trigger(&self, document_id: Uuid) -> Result<()>;
}
