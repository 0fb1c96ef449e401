//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the pipeline
//! without making real LLM or network calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::{PipelineError, Result};
use crate::traits::ai::{InsightModel, InsightPrompt, RawInsight};
use crate::traits::trigger::ExtractionTrigger;
use crate::types::InsightCategory;

/// A scripted response for [`MockModel`].
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this insight batch
    Insights(Vec<RawInsight>),

    /// Fail as if the upstream returned 429
    RateLimited,

    /// Fail as if the upstream returned 402
    QuotaExhausted,

    /// Fail with a generic upstream error
    Upstream(String),

    /// Fail as if the response was unparseable
    Parse(String),
}

/// A mock insight model for testing.
///
/// Scripted responses are consumed in order; once the script is empty the
/// mock falls back to a single deterministic insight. Every prompt is
/// recorded for assertions.
#[derive(Default)]
pub struct MockModel {
    script: Mutex<VecDeque<MockResponse>>,
    calls: Mutex<Vec<InsightPrompt>>,
}

impl MockModel {
    /// Create a mock with default behavior (one deterministic insight).
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scripted response.
    pub fn with_response(self, response: MockResponse) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    /// Queue an insight batch.
    pub fn with_insights(self, insights: Vec<RawInsight>) -> Self {
        self.with_response(MockResponse::Insights(insights))
    }

    /// Prompts seen so far, in call order.
    pub fn calls(&self) -> Vec<InsightPrompt> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of extraction calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InsightModel for MockModel {
    async fn extract_insights(&self, prompt: &InsightPrompt) -> Result<Vec<RawInsight>> {
        self.calls.lock().unwrap().push(prompt.clone());

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(MockResponse::Insights(insights)) => Ok(insights),
            Some(MockResponse::RateLimited) => Err(PipelineError::RateLimited),
            Some(MockResponse::QuotaExhausted) => Err(PipelineError::QuotaExhausted),
            Some(MockResponse::Upstream(msg)) => Err(PipelineError::Upstream(msg)),
            Some(MockResponse::Parse(msg)) => Err(PipelineError::Parse(msg)),
            None => Ok(vec![sample_insight(InsightCategory::Feedback, 80)]),
        }
    }
}

/// Build a raw insight with fixed title and summary.
pub fn sample_insight(category: InsightCategory, confidence: i64) -> RawInsight {
    RawInsight {
        category,
        title: "Mock insight".to_string(),
        summary: "A deterministic insight for tests.".to_string(),
        confidence,
    }
}

/// A trigger that records every requested document id.
#[derive(Default)]
pub struct RecordingTrigger {
    ids: Mutex<Vec<Uuid>>,
}

impl RecordingTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document ids triggered so far, in call order.
    pub fn triggered(&self) -> Vec<Uuid> {
        self.ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionTrigger for RecordingTrigger {
    async fn trigger(&self, document_id: Uuid) -> Result<()> {
        self.ids.lock().unwrap().push(document_id);
        Ok(())
    }
}

/// A trigger that always fails, for exercising the upload warning path.
pub struct FailingTrigger;

#[async_trait]
impl ExtractionTrigger for FailingTrigger {
    async fn trigger(&self, _document_id: Uuid) -> Result<()> {
        Err(PipelineError::Upstream("trigger unavailable".to_string()))
    }
}
