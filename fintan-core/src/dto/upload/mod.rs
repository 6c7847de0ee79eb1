//! Upload DTOs

use serde::{Deserialize, Serialize};

/// Upload fields that may also arrive in the query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadQuery {
    #[serde(rename = "type")]
    pub upload_type: Option<String>,
    pub pipeline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: String,
}

impl UploadResponse {
    pub fn uploaded() -> Self {
        Self {
            success: "File successfully uploaded".to_string(),
        }
    }
}
