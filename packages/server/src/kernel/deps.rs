//! Dependency container wiring storage, object store, and model together.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

use insights::{run_extraction, ExtractionTrigger, InsightModel, ObjectStore, Store};

/// Shared dependencies injected into route handlers.
///
/// Everything behind `Arc<dyn ...>` so tests can swap in the in-memory
/// store and mock model without touching handler code.
pub struct ServerDeps {
    pub store: Arc<dyn Store>,
    pub objects: Arc<dyn ObjectStore>,
    pub model: Arc<dyn InsightModel>,

    /// The fixed placeholder principal all rows are owned by.
    pub owner_id: Uuid,
}

impl ServerDeps {
    pub fn new(
        store: Arc<dyn Store>,
        objects: Arc<dyn ObjectStore>,
        model: Arc<dyn InsightModel>,
        owner_id: Uuid,
    ) -> Self {
        Self {
            store,
            objects,
            model,
            owner_id,
        }
    }
}

/// Trigger that runs extraction as a detached background task.
///
/// Upload requests return as soon as the document row exists; the
/// spawned task owns the outcome and flips the document status itself.
pub struct SpawnTrigger {
    store: Arc<dyn Store>,
    model: Arc<dyn InsightModel>,
    owner_id: Uuid,
}

impl SpawnTrigger {
    pub fn new(store: Arc<dyn Store>, model: Arc<dyn InsightModel>, owner_id: Uuid) -> Self {
        Self {
            store,
            model,
            owner_id,
        }
    }

    /// Build a trigger from the shared dependency container.
    pub fn from_deps(deps: &ServerDeps) -> Self {
        Self::new(deps.store.clone(), deps.model.clone(), deps.owner_id)
    }
}

#[async_trait]
impl ExtractionTrigger for SpawnTrigger {
    async fn trigger(&self, document_id: Uuid) -> insights::Result<()> {
        let store = self.store.clone();
        let model = self.model.clone();
        let owner_id = self.owner_id;

        tokio::spawn(async move {
            match run_extraction(store.as_ref(), model.as_ref(), owner_id, document_id).await {
                Ok(outcome) => {
                    info!(
                        document_id = %document_id,
                        insights = outcome.insights_count(),
                        "background extraction complete"
                    );
                }
                Err(err) => {
                    // run_extraction already marked the document errored
                    error!(document_id = %document_id, error = %err, "background extraction failed");
                }
            }
        });

        Ok(())
    }
}
