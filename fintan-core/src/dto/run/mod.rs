//! Run DTOs

use serde::{Deserialize, Serialize};

/// Query parameters accepted by the run endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunQuery {
    pub params: Option<String>,
}

/// Successful run response carrying the backend's standard output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    pub result: String,
}
