//! Fintan Gateway
//!
//! HTTP front-end that stores data files and pipeline definitions on disk
//! and runs pipelines by invoking the external Fintan backend.
//!
//! Architecture:
//! - Configuration: flags with `FINTAN_*` environment fallbacks
//! - Repository: filesystem access
//! - Services: pipeline registry, request decoding, process dispatch, uploads
//! - API: axum handlers and router

pub mod api;
pub mod config;
pub mod repository;
pub mod service;

pub use api::{AppState, create_router};
pub use config::Config;
