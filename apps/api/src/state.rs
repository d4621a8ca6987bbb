use std::sync::Arc;

use crate::extraction::extractor::EventExtractor;
use crate::extraction::store::EventStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup around the configured model client.
    pub extractor: Arc<EventExtractor>,
    /// Process-local event list for the read/delete endpoints.
    pub events: EventStore,
}
