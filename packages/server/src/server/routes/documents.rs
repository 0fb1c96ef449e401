//! Document routes: multipart upload and listing.

use axum::extract::{Extension, Multipart};
use axum::http::StatusCode;
use axum::Json;

use insights::{upload_document, Document, DocumentStore, DocumentUpload, SourceType};

use crate::kernel::SpawnTrigger;
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Upload a document.
///
/// Expects a multipart form with a `file` part (with filename) and a
/// `source_type` part naming one of the recognized source types. The
/// document row is created with status `processing`; extraction runs in
/// the background and the response does not wait for it.
pub async fn upload_document_handler(
    Extension(state): Extension<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut source_type: Option<SourceType> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::bad_request("file part must have a filename"))?;
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read file: {e}")))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            Some("source_type") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read source_type: {e}")))?;
                source_type = Some(text.parse().map_err(ApiError::bad_request)?);
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| ApiError::bad_request("missing file part"))?;
    let source_type =
        source_type.ok_or_else(|| ApiError::bad_request("missing source_type part"))?;

    let trigger = SpawnTrigger::from_deps(&state.deps);
    let documents: &dyn DocumentStore = state.deps.store.as_ref();

    let document = upload_document(
        documents,
        state.deps.objects.as_ref(),
        &trigger,
        state.deps.owner_id,
        DocumentUpload {
            file_name,
            content_type,
            bytes,
            source_type,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

/// List documents, newest first.
pub async fn list_documents_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let documents = state
        .deps
        .store
        .list_documents(state.deps.owner_id)
        .await?;
    Ok(Json(documents))
}
