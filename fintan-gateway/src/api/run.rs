//! Run API Handlers
//!
//! HTTP endpoints that execute a pipeline on the request body.
//!
//! The backend's standard output is returned as `{"result": ...}`. The exit
//! status travels in the `X-Backend-Exit-Code` header; unless strict exit
//! mode is enabled a failing backend still answers 200 with whatever it
//! printed.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use fintan_core::dto::run::{RunQuery, RunResponse};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::run_service::{self, RunRequest};

pub const EXIT_CODE_HEADER: &str = "x-backend-exit-code";

/// POST /api/run
/// Run the only registered pipeline
pub async fn run_default(
    State(state): State<AppState>,
    Query(query): Query<RunQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    execute(state, None, query, &headers, &body).await
}

/// POST /api/run/{pipeline}
/// Run a named pipeline
pub async fn run_named(
    State(state): State<AppState>,
    Path(pipeline): Path<String>,
    Query(query): Query<RunQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    execute(state, Some(pipeline), query, &headers, &body).await
}

async fn execute(
    state: AppState,
    pipeline: Option<String>,
    query: RunQuery,
    headers: &HeaderMap,
    body: &[u8],
) -> ApiResult<Response> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let req = RunRequest {
        pipeline: pipeline.as_deref(),
        content_type,
        body,
        params: query.params,
    };

    let outcome =
        run_service::run_pipeline(&state.registry, state.dispatcher.as_ref(), req).await?;
    let result = outcome.result;

    if state.config.strict_exit_status && !result.success() {
        tracing::warn!(
            "Pipeline '{}' failed with exit status {:?}",
            outcome.pipeline,
            result.exit_code
        );
        return Err(ApiError::BackendFailed {
            exit_code: result.exit_code,
            result: result.stdout,
        });
    }

    let exit_code = match result.exit_code {
        Some(code) => HeaderValue::from(code),
        None => HeaderValue::from_static("signal"),
    };

    let mut response = Json(RunResponse {
        result: result.stdout,
    })
    .into_response();
    response.headers_mut().insert(EXIT_CODE_HEADER, exit_code);

    Ok(response)
}
