//! Data Transfer Objects for the HTTP API
//!
//! JSON bodies produced by the gateway. Clients can deserialize
//! responses into these directly.

pub mod file;
pub mod run;
pub mod upload;
