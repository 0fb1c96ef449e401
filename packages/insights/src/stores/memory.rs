//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::traits::store::{DocumentStore, InsightStore, ObjectStore};
use crate::types::{Document, DocumentStatus, Insight, NewDocument, NewInsight};

/// In-memory storage for documents, insights, and uploaded objects.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart. Rows are kept in insertion order so
/// newest-first listings stay deterministic even when timestamps collide.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
    insights: RwLock<Vec<Insight>>,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    /// Get a stored object's bytes.
    pub fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.read().unwrap().get(path).cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_document(&self, new: NewDocument) -> Result<Document> {
        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            name: new.name,
            source_type: new.source_type,
            object_path: new.object_path,
            content: new.content,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        self.documents.write().unwrap().push(document.clone());
        Ok(document)
    }

    async fn get_document(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Document>> {
        Ok(self
            .documents
            .read()
            .unwrap()
            .iter()
            .find(|d| d.id == id && d.owner_id == owner_id)
            .cloned())
    }

    async fn list_documents(&self, owner_id: Uuid) -> Result<Vec<Document>> {
        Ok(self
            .documents
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: DocumentStatus) -> Result<()> {
        if let Some(document) = self
            .documents
            .write()
            .unwrap()
            .iter_mut()
            .find(|d| d.id == id)
        {
            document.status = status;
            document.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl InsightStore for MemoryStore {
    async fn insert_insights(&self, batch: Vec<NewInsight>) -> Result<Vec<Insight>> {
        let inserted: Vec<Insight> = batch
            .into_iter()
            .map(|new| Insight {
                id: Uuid::new_v4(),
                owner_id: new.owner_id,
                category: new.category,
                title: new.title,
                summary: new.summary,
                sources: new.sources,
                confidence: new.confidence,
                document_ids: new.document_ids,
                created_at: Utc::now(),
            })
            .collect();
        self.insights.write().unwrap().extend(inserted.clone());
        Ok(inserted)
    }

    async fn list_insights(&self, owner_id: Uuid) -> Result<Vec<Insight>> {
        Ok(self
            .insights
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.objects
            .write()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }
}
