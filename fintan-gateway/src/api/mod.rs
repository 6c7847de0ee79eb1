//! API Module
//!
//! HTTP API layer for the gateway.
//! Each submodule handles endpoints for a specific concern.

pub mod docs;
pub mod error;
pub mod files;
pub mod health;
pub mod pipeline;
pub mod run;
pub mod upload;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::service::{Dispatcher, PipelineRegistry};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<PipelineRegistry>,
    pub dispatcher: Arc<dyn Dispatcher>,
}

impl AppState {
    pub fn new(config: Config, registry: PipelineRegistry, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            dispatcher,
        }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        // Documentation
        .route("/", get(docs::index))
        .route("/api/docs", get(docs::docs_page))
        .route("/api/docs/", get(docs::docs_page))
        .route("/static/openapi.yaml", get(docs::openapi_spec))
        // Health check
        .route("/health", get(health::health_check))
        // Pipeline endpoints
        .route("/api/pipelines", get(pipeline::list_pipelines))
        .route("/api/pipelines/", get(pipeline::list_pipelines))
        // File endpoints
        .route("/api/files", get(files::list_files))
        .route("/api/files/", get(files::list_files))
        .route("/api/files/{filename}", get(files::get_file))
        .route(
            "/api/upload",
            post(upload::upload_file).put(upload::upload_file),
        )
        .route(
            "/api/upload/",
            post(upload::upload_file).put(upload::upload_file),
        )
        // Run endpoints
        .route("/api/run", post(run::run_default))
        .route("/api/run/", post(run::run_default))
        .route("/api/run/{pipeline}", post(run::run_named))
        .route("/api/run/{pipeline}/", post(run::run_named))
        // Add state and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
