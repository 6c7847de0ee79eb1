//! Fintan Core
//!
//! Core types shared by the Fintan gateway and its clients.
//!
//! This crate contains:
//! - Domain types: pipelines, invocations, request content decoding, uploads
//! - DTOs: JSON bodies exchanged over the HTTP API

pub mod domain;
pub mod dto;
