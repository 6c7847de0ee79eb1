//! Service Module
//!
//! Business logic layer for the gateway.
//! Services orchestrate between the filesystem repository, the pipeline
//! registry and the backend dispatcher.

pub mod dispatcher;
pub mod files;
pub mod registry;
pub mod run;
pub mod upload;

// Re-export for convenience
pub use files as files_service;
pub use run as run_service;
pub use upload as upload_service;

pub use dispatcher::{BackendCommand, Dispatcher, ProcessDispatcher};
pub use registry::PipelineRegistry;
