//! Core domain types
//!
//! These types describe what the gateway knows about pipelines and the
//! requests that run them. They carry no I/O; the gateway crate owns the
//! filesystem and process side.

pub mod content;
pub mod invocation;
pub mod pipeline;
pub mod upload;
