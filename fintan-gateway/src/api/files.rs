//! Files API Handlers
//!
//! Listing and download of files in the data directory.

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use fintan_core::dto::file::FileList;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::files_service;

/// GET /api/files
/// List data files
pub async fn list_files(State(state): State<AppState>) -> ApiResult<Json<FileList>> {
    let files = files_service::list_data_files(&state.config.data_dir).await?;
    Ok(Json(FileList { files }))
}

/// GET /api/files/{filename}
/// Raw contents of one data file
pub async fn get_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    tracing::debug!("Reading data file: {}", filename);

    let contents = files_service::read_data_file(&state.config.data_dir, &filename).await?;

    let content_type = if std::str::from_utf8(&contents).is_ok() {
        "text/plain; charset=utf-8"
    } else {
        "application/octet-stream"
    };

    Ok(([(header::CONTENT_TYPE, content_type)], contents).into_response())
}
