//! Documentation API Handlers
//!
//! Serves the OpenAPI description and a Swagger UI page for it.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

const BUNDLED_OPENAPI: &str = include_str!("../../static/openapi.yaml");
const DOCS_PAGE: &str = include_str!("../../static/docs.html");

/// GET /
pub async fn index() -> Redirect {
    Redirect::to("/api/docs")
}

/// GET /api/docs
pub async fn docs_page() -> Html<&'static str> {
    Html(DOCS_PAGE)
}

/// GET /static/openapi.yaml
/// Serve the override document if it exists, else the bundled one
pub async fn openapi_spec(State(state): State<AppState>) -> ApiResult<Response> {
    let override_path = &state.config.openapi_override;

    let document = match tokio::fs::try_exists(override_path).await {
        Ok(true) => tokio::fs::read_to_string(override_path)
            .await
            .map_err(|e| {
                ApiError::InternalError(format!(
                    "Failed to read {}: {}",
                    override_path.display(),
                    e
                ))
            })?,
        _ => BUNDLED_OPENAPI.to_string(),
    };

    Ok((
        [
            (header::CONTENT_TYPE, "application/yaml"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        document,
    )
        .into_response())
}
