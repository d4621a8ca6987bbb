use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

const SERVICE_NAME: &str = "event-api";

/// GET /
/// Returns a banner confirming the service is up.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Event extraction API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /health
/// Returns a simple status object with the configured model.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "model": state.extractor.model_name(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
