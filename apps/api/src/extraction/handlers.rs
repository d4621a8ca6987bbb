//! Axum route handlers for the Events API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::store::EventFilter;
use crate::models::event::{EventMode, ExtractionRequest, ResolvedEvent};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub event: ResolvedEvent,
    pub analysis: String,
    pub tokens_used: usize,
}

#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    #[serde(alias = "mode")]
    pub event_type: Option<EventMode>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<ResolvedEvent>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteEventResponse {
    pub message: String,
    pub event_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/events/analyze
///
/// Runs the extraction pipeline over an email or chat message and stores the result.
/// Model failures do not produce an error status; they show up as confidence 0.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<ExtractionRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let event = state
        .extractor
        .extract(&request.text, request.mode, request.user_id.as_deref())
        .await;
    state.events.insert(event.clone()).await;

    let analysis = summarize(&event);
    let tokens_used = estimate_tokens(&request.text);

    Ok(Json(AnalyzeResponse {
        event,
        analysis,
        tokens_used,
    }))
}

/// GET /api/v1/events
///
/// Lists stored events, newest first, optionally filtered by mode and user.
pub async fn handle_list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Json<EventListResponse> {
    let filter = EventFilter {
        mode: query.event_type,
        user_id: query.user_id,
    };
    let events = state.events.list(&filter).await;
    info!("Listed {} events", events.len());

    Json(EventListResponse {
        total: events.len(),
        events,
    })
}

/// GET /api/v1/events/:id
pub async fn handle_get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ResolvedEvent>, AppError> {
    state
        .events
        .get(event_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Event {event_id} not found")))
}

/// DELETE /api/v1/events/:id
pub async fn handle_delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<DeleteEventResponse>, AppError> {
    state
        .events
        .remove(event_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Event {event_id} not found")))?;
    info!("Deleted event {event_id}");

    Ok(Json(DeleteEventResponse {
        message: "Event deleted".to_string(),
        event_id,
    }))
}

/// One-line human summary of an extracted event.
fn summarize(event: &ResolvedEvent) -> String {
    let name = event.customer_name.as_deref().unwrap_or("unknown");
    let mut analysis = format!("'{name}' {} event created.", event.mode.as_str());
    if let Some(datetime) = &event.datetime {
        analysis.push_str(&format!(" Scheduled: {}", datetime.display()));
    }
    analysis
}

/// Rough token estimate: four characters per token.
fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}
