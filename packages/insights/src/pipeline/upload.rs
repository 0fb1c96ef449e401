//! Upload flow: derive content, persist the file and row, request extraction.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::traits::store::{DocumentStore, ObjectStore};
use crate::traits::trigger::ExtractionTrigger;
use crate::types::{Document, DocumentStatus, DocumentUpload, NewDocument};

/// File extensions whose bytes are stored verbatim as document content.
const TEXT_EXTENSIONS: [&str; 5] = [".txt", ".md", ".csv", ".json", ".xml"];

/// Derive the stored text content for an upload.
///
/// Recognized text files are stored verbatim (lossy UTF-8). Anything else
/// gets a synthesized placeholder carrying the file's metadata, a degraded
/// mode that still lets the model produce plausible insights when no text
/// is extractable.
pub fn derive_content(upload: &DocumentUpload) -> String {
    let name = upload.file_name.to_lowercase();
    if TEXT_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        return String::from_utf8_lossy(&upload.bytes).into_owned();
    }

    format!(
        "Document name: {}\nFile type: {}\nSource type: {}\n\n\
         This is a binary document. Please generate plausible product management \
         insights based on the document name and source type alone.",
        upload.file_name,
        upload.content_type.as_deref().unwrap_or("unknown"),
        upload.source_type,
    )
}

/// Object-store path for an upload: per-owner, timestamp-namespaced.
///
/// Path separators in the file name are flattened so the name cannot
/// introduce extra path components.
fn object_path(owner_id: Uuid, file_name: &str) -> String {
    let safe_name: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}/{}-{}", owner_id, Utc::now().timestamp_millis(), safe_name)
}

/// Persist an upload and request extraction for it.
///
/// Ordering is deliberate: the object upload happens before the row insert
/// (an object-store failure aborts the whole upload), and the row insert
/// happens before the trigger. A trigger failure is downgraded to a
/// warning, leaving the document in `processing` until manually retried.
/// Uploads are never deduplicated; every call creates a new document.
pub async fn upload_document(
    documents: &dyn DocumentStore,
    objects: &dyn ObjectStore,
    trigger: &dyn ExtractionTrigger,
    owner_id: Uuid,
    upload: DocumentUpload,
) -> Result<Document> {
    let content = derive_content(&upload);

    let path = object_path(owner_id, &upload.file_name);
    objects.put_object(&path, &upload.bytes).await?;

    let document = documents
        .insert_document(NewDocument {
            owner_id,
            name: upload.file_name,
            source_type: upload.source_type,
            object_path: Some(path),
            content: Some(content),
            status: DocumentStatus::Processing,
        })
        .await?;

    info!(document_id = %document.id, source_type = %document.source_type, "document uploaded");

    if let Err(err) = trigger.trigger(document.id).await {
        warn!(
            document_id = %document.id,
            error = %err,
            "document uploaded but extraction trigger failed; retry manually"
        );
    }

    Ok(document)
}
