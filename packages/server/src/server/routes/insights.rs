//! Insight routes: listing and the manual extraction trigger.

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use insights::{run_extraction, Insight};

use crate::server::app::AppState;
use crate::server::error::ApiError;

/// List insights, newest first.
pub async fn list_insights_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Insight>>, ApiError> {
    let insights = state.deps.store.list_insights(state.deps.owner_id).await?;
    Ok(Json(insights))
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub document_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub insights_count: usize,
}

/// Run extraction for a document and wait for the result.
///
/// This is the manual retry path for documents stuck in `processing` or
/// flipped to `error`. Re-invocation appends another insight batch;
/// there is deliberately no dedup. Upstream rate-limit and quota
/// failures surface as 429 and 402. A malformed body (missing or invalid
/// `document_id`) is a 400 in the standard error envelope, not axum's
/// default rejection.
pub async fn generate_insights_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let outcome = run_extraction(
        state.deps.store.as_ref(),
        state.deps.model.as_ref(),
        state.deps.owner_id,
        request.document_id,
    )
    .await?;

    Ok(Json(GenerateResponse {
        success: true,
        insights_count: outcome.insights_count(),
    }))
}
