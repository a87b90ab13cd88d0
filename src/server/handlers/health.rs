//! Health check handler.

use axum::{Json, extract::State};
use chrono::Local;
use serde_json::{Value, json};
use std::sync::Arc;

use super::super::state::AppState;

/// Handle GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let settings = state.settings.read().await.settings();

    Json(json!({
        "status": "ok",
        "timestamp": Local::now().to_rfc3339(),
        "platform": state.discovery().platform(),
        "configured_printer": settings.printer(),
        "store_configured": settings.store_configured(),
    }))
}
