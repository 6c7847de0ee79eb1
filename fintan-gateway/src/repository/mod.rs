//! Repository Module
//!
//! Data access layer for the gateway. All state lives on the filesystem:
//! pipeline definitions, data files and uploads.

pub mod fs;

// Re-export for convenience
pub use fs as fs_repository;
