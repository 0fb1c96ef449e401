//! The extraction function: document in, validated insight batch out.

use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::error::{PipelineError, Result};
use crate::pipeline::prompts::build_prompt;
use crate::traits::ai::{InsightModel, RawInsight};
use crate::traits::store::Store;
use crate::types::{clamp_confidence, Document, DocumentStatus, Insight, NewInsight};

/// Result of a successful extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub document_id: Uuid,
    pub insights: Vec<Insight>,
}

impl ExtractionOutcome {
    /// Number of insights persisted by this run.
    pub fn insights_count(&self) -> usize {
        self.insights.len()
    }
}

/// Run the extraction pipeline for one document.
///
/// Stateless per call; concurrent runs for the same document id are
/// allowed and each appends its own insight batch (re-invocation is the
/// manual retry path, not a no-op). Failures after the owner-scoped load
/// flip the document to `error` on a best-effort basis so it never sits
/// in `processing` forever; a failed load mutates nothing, so a caller
/// with the wrong owner id cannot touch someone else's document.
#[instrument(skip(store, model), fields(document_id = %document_id))]
pub async fn run_extraction(
    store: &dyn Store,
    model: &dyn InsightModel,
    owner_id: Uuid,
    document_id: Uuid,
) -> Result<ExtractionOutcome> {
    let document = store
        .get_document(owner_id, document_id)
        .await?
        .ok_or(PipelineError::NotFound { document_id })?;

    match try_extraction(store, model, &document).await {
        Ok(outcome) => {
            info!(insights = outcome.insights_count(), "extraction complete");
            Ok(outcome)
        }
        Err(err) => {
            error!(error = %err, "extraction failed");
            if let Err(mark_err) = store.update_status(document.id, DocumentStatus::Error).await {
                error!(error = %mark_err, "failed to mark document as errored");
            }
            Err(err)
        }
    }
}

async fn try_extraction(
    store: &dyn Store,
    model: &dyn InsightModel,
    document: &Document,
) -> Result<ExtractionOutcome> {
    let prompt = build_prompt(document);
    let raw_insights = model.extract_insights(&prompt).await?;

    let batch: Vec<NewInsight> = raw_insights
        .into_iter()
        .map(|raw| validate_insight(raw, document))
        .collect();

    let insights = if batch.is_empty() {
        Vec::new()
    } else {
        store.insert_insights(batch).await?
    };

    store
        .update_status(document.id, DocumentStatus::Processed)
        .await?;

    Ok(ExtractionOutcome {
        document_id: document.id,
        insights,
    })
}

/// Turn a raw model insight into a persistable row.
///
/// Confidence is clamped into the allowed range; title and summary pass
/// through verbatim (category was already enum-validated at parse time).
/// The originating document supplies the sole source label and linked id.
fn validate_insight(raw: RawInsight, document: &Document) -> NewInsight {
    NewInsight {
        owner_id: document.owner_id,
        category: raw.category,
        title: raw.title,
        summary: raw.summary,
        sources: vec![document.name.clone()],
        confidence: clamp_confidence(raw.confidence),
        document_ids: vec![document.id],
    }
}
