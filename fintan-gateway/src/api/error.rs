//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::service::files_service::FilesError;
use crate::service::registry::RegistryError;
use crate::service::run_service::RunError;
use crate::service::upload_service::UploadError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    UnsupportedMediaType(String),
    /// Backend exited unsuccessfully; only produced in strict exit mode
    BackendFailed {
        exit_code: Option<i32>,
        result: String,
    },
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            ApiError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::BackendFailed { exit_code, result } => (
                StatusCode::BAD_GATEWAY,
                serde_json::json!({
                    "error": "Pipeline backend exited unsuccessfully",
                    "exit_code": exit_code,
                    "result": result,
                }),
            ),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RunError> for ApiError {
    fn from(err: RunError) -> Self {
        match err {
            RunError::NoPipelines | RunError::AmbiguousPipeline => {
                ApiError::BadRequest(err.to_string())
            }
            RunError::PipelineNotFound(_) => ApiError::NotFound(err.to_string()),
            RunError::UnsupportedContentType(_) => ApiError::UnsupportedMediaType(err.to_string()),
            RunError::InvalidBody { .. } => ApiError::BadRequest(err.to_string()),
            RunError::Dispatch(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NoFile
            | UploadError::UnsupportedExtension(_)
            | UploadError::InvalidPipelineDir(_) => ApiError::BadRequest(err.to_string()),
            UploadError::Fs(e) => ApiError::InternalError(e.to_string()),
            UploadError::Registry(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<FilesError> for ApiError {
    fn from(err: FilesError) -> Self {
        match err {
            FilesError::NotFound(_) => ApiError::NotFound(err.to_string()),
            FilesError::Fs(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_errors_are_client_errors() {
        let status = |err: RunError| ApiError::from(err).into_response().status();

        assert_eq!(status(RunError::NoPipelines), StatusCode::BAD_REQUEST);
        assert_eq!(status(RunError::AmbiguousPipeline), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(RunError::PipelineNotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(RunError::UnsupportedContentType(None)),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn test_upload_errors_are_bad_requests() {
        let response = ApiError::from(UploadError::NoFile).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_backend_failure_is_bad_gateway() {
        let response = ApiError::BackendFailed {
            exit_code: Some(1),
            result: String::new(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
