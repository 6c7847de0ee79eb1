//! Pipeline API Handlers
//!
//! HTTP endpoints for pipeline discovery.

use axum::{Json, extract::State};

use crate::api::AppState;

/// GET /api/pipelines
/// List registered pipeline names in lexicographic order
pub async fn list_pipelines(State(state): State<AppState>) -> Json<Vec<String>> {
    tracing::debug!("Listing all pipelines");
    Json(state.registry.list())
}
