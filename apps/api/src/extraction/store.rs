//! In-memory event store backing the list/detail/delete endpoints.
//!
//! Process-local and lost on restart. Lives at the HTTP layer; the extraction
//! pipeline itself never touches it.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::event::{EventMode, ResolvedEvent};

/// Optional filters for `EventStore::list`.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub mode: Option<EventMode>,
    pub user_id: Option<String>,
}

/// Cloneable handle onto a shared list of events.
#[derive(Clone, Default)]
pub struct EventStore {
    events: Arc<RwLock<Vec<ResolvedEvent>>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, event: ResolvedEvent) {
        self.events.write().await.push(event);
    }

    /// Events matching `filter`, newest first.
    pub async fn list(&self, filter: &EventFilter) -> Vec<ResolvedEvent> {
        let events = self.events.read().await;
        let mut matched: Vec<ResolvedEvent> = events
            .iter()
            .filter(|e| filter.mode.map_or(true, |m| e.mode == m))
            .filter(|e| {
                filter
                    .user_id
                    .as_deref()
                    .map_or(true, |u| e.user_id.as_deref() == Some(u))
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }

    pub async fn get(&self, id: Uuid) -> Option<ResolvedEvent> {
        self.events.read().await.iter().find(|e| e.id == id).cloned()
    }

    /// Removes and returns the event, or `None` if no event has that id.
    pub async fn remove(&self, id: Uuid) -> Option<ResolvedEvent> {
        let mut events = self.events.write().await;
        let index = events.iter().position(|e| e.id == id)?;
        Some(events.remove(index))
    }
}
