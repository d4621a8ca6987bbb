//! Extraction Orchestrator — prompt → model → interpreter → date resolver → `ResolvedEvent`.
//!
//! `extract` never fails. Model errors, timeouts and empty input all come back as a
//! `ResolvedEvent` with confidence 0 and the error text in `extracted_fields`.
//! Extractions share no mutable state and may run concurrently.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, Utc};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::extraction::date_resolver::resolve_event_time;
use crate::extraction::interpreter::interpret_reply;
use crate::extraction::prompts::build_extraction_prompt;
use crate::llm_client::{ChatModel, LlmError};
use crate::models::event::{CandidateFields, EventMode, EventTime, ResolvedEvent};

/// Confidence attached to any successful structured parse.
pub const PARSED_CONFIDENCE: f32 = 0.8;
/// Confidence attached to every failure path.
pub const FAILED_CONFIDENCE: f32 = 0.0;
/// Description used when the extraction could not run.
pub const ANALYSIS_FAILED: &str = "Analysis failed.";

const LOG_PREFIX_CHARS: usize = 50;

#[derive(Debug, Error)]
enum ExtractionError {
    #[error("text is empty")]
    EmptyText,

    #[error(transparent)]
    Model(#[from] LlmError),
}

/// Holds the model collaborator, built once at startup and shared via `Arc`.
pub struct EventExtractor {
    model: Arc<dyn ChatModel>,
    timeout: Duration,
}

impl EventExtractor {
    pub fn new(model: Arc<dyn ChatModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Extracts an event from `text`, resolving relative dates against the local date.
    pub async fn extract(
        &self,
        text: &str,
        mode: EventMode,
        user_id: Option<&str>,
    ) -> ResolvedEvent {
        self.extract_on(text, mode, user_id, Local::now().date_naive())
            .await
    }

    /// Same as `extract`, with an explicit anchor for "today".
    pub async fn extract_on(
        &self,
        text: &str,
        mode: EventMode,
        user_id: Option<&str>,
        today: NaiveDate,
    ) -> ResolvedEvent {
        let now = Utc::now();
        let preview: String = text.chars().take(LOG_PREFIX_CHARS).collect();
        info!("Extraction started: mode={} text={preview:?}", mode.as_str());

        match self.run(text, mode, today).await {
            Ok((fields, datetime)) => {
                info!(
                    "Extraction finished: mode={} customer={:?} datetime={:?}",
                    mode.as_str(),
                    fields.customer_name,
                    datetime
                );
                ResolvedEvent {
                    id: Uuid::new_v4(),
                    mode,
                    customer_name: fields.customer_name,
                    datetime,
                    description: fields.description,
                    original_text: text.to_string(),
                    user_id: user_id.map(String::from),
                    confidence: PARSED_CONFIDENCE,
                    extracted_fields: Value::Object(fields.raw),
                    created_at: now,
                    updated_at: now,
                }
            }
            Err(e) => {
                warn!("Extraction failed: mode={} error={e}", mode.as_str());
                ResolvedEvent {
                    id: Uuid::new_v4(),
                    mode,
                    customer_name: None,
                    datetime: None,
                    description: Some(ANALYSIS_FAILED.to_string()),
                    original_text: text.to_string(),
                    user_id: user_id.map(String::from),
                    confidence: FAILED_CONFIDENCE,
                    extracted_fields: json!({ "error": e.to_string() }),
                    created_at: now,
                    updated_at: now,
                }
            }
        }
    }

    async fn run(
        &self,
        text: &str,
        mode: EventMode,
        today: NaiveDate,
    ) -> Result<(CandidateFields, Option<EventTime>), ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyText);
        }

        let prompt = build_extraction_prompt(mode, text);

        let reply = tokio::time::timeout(self.timeout, self.model.complete(&prompt))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;

        let fields = interpret_reply(&reply);
        let datetime = fields
            .datetime
            .as_deref()
            .and_then(|expr| resolve_event_time(expr, text, today));

        Ok((fields, datetime))
    }
}
