//! Health Check API Handler

use axum::{Json, extract::State};
use serde_json::{Value as JsonValue, json};

use crate::api::AppState;

/// GET /health
/// Liveness check reporting the size of the pipeline registry
pub async fn health_check(State(state): State<AppState>) -> Json<JsonValue> {
    Json(json!({
        "status": "ok",
        "pipelines": state.registry.snapshot().len(),
    }))
}
