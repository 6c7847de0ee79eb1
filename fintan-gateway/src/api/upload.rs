//! Upload API Handlers
//!
//! Multipart upload of data files and pipeline definitions.

use axum::{
    Json,
    extract::{Multipart, Query, State, multipart::MultipartRejection},
};
use fintan_core::domain::upload::UploadKind;
use fintan_core::dto::upload::{UploadQuery, UploadResponse};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::upload_service::{self, UploadRequest};

/// Fields collected from the multipart form
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<(Option<String>, Vec<u8>)>,
    upload_type: Option<String>,
    pipeline: Option<String>,
}

/// POST|PUT /api/upload
/// Store a file; `type` and `pipeline` may come from the form or the query
pub async fn upload_file(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let multipart = multipart
        .map_err(|e| ApiError::BadRequest(format!("No file provided: {}", e.body_text())))?;
    let form = read_form(multipart).await?;

    let (filename, contents) = form
        .file
        .ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;
    let upload_type = form.upload_type.or(query.upload_type);

    let req = UploadRequest {
        filename,
        contents,
        kind: UploadKind::from_field(upload_type.as_deref()),
        pipeline: form.pipeline.or(query.pipeline),
    };

    tracing::info!(
        "Receiving upload {:?} ({:?})",
        req.filename.as_deref().unwrap_or_default(),
        req.kind
    );

    upload_service::store_upload(&state.config.uploads_dir, &state.registry, req).await?;

    Ok(Json(UploadResponse::uploaded()))
}

async fn read_form(mut multipart: Multipart) -> ApiResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "file" => {
                let filename = field.file_name().map(str::to_string);
                let contents = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                form.file = Some((filename, contents.to_vec()));
            }
            "type" | "pipeline" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid field '{}': {}", name, e)))?;
                if name == "type" {
                    form.upload_type = Some(value);
                } else {
                    form.pipeline = Some(value);
                }
            }
            other => tracing::debug!("Ignoring upload field '{}'", other),
        }
    }

    Ok(form)
}
