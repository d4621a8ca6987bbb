pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Events API
        .route("/api/v1/events", get(handlers::handle_list_events))
        .route("/api/v1/events/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/events/:id",
            get(handlers::handle_get_event).delete(handlers::handle_delete_event),
        )
        .with_state(state)
}
