//! Run Service
//!
//! Resolves which pipeline a run request targets, decodes the request
//! body into payload text and hands both to the dispatcher. Every
//! validation happens before a process is spawned.

use fintan_core::domain::content::{ContentKind, DecodeError};
use fintan_core::domain::invocation::{InvocationRequest, InvocationResult};
use thiserror::Error;

use crate::service::dispatcher::{DispatchError, Dispatcher};
use crate::service::registry::PipelineRegistry;

/// Service error type
#[derive(Debug, Error)]
pub enum RunError {
    #[error("No pipelines found, upload or ship one with the container")]
    NoPipelines,

    #[error("Multiple pipelines found, pipeline argument must be specified explicitly")]
    AmbiguousPipeline,

    #[error("Pipeline not found")]
    PipelineNotFound(String),

    #[error("Unsupported content-type for input data")]
    UnsupportedContentType(Option<String>),

    #[error("Invalid {kind} body: {source}")]
    InvalidBody {
        kind: ContentKind,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type Result<T> = std::result::Result<T, RunError>;

/// Everything the HTTP layer extracted from a run request
#[derive(Debug, Clone, Default)]
pub struct RunRequest<'a> {
    pub pipeline: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub body: &'a [u8],
    pub params: Option<String>,
}

/// A completed run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub pipeline: String,
    pub result: InvocationResult,
}

/// Runs a pipeline for one request
pub async fn run_pipeline(
    registry: &PipelineRegistry,
    dispatcher: &dyn Dispatcher,
    req: RunRequest<'_>,
) -> Result<RunOutcome> {
    let pipeline = resolve_pipeline(registry, req.pipeline)?;
    let payload = decode_payload(req.content_type, req.body)?;

    let request = InvocationRequest::new(pipeline.clone(), req.params, payload);
    let definition = registry.definition_path(&pipeline);

    tracing::info!("Running pipeline '{}'", pipeline);
    let result = dispatcher.run(&definition, &request).await?;

    Ok(RunOutcome { pipeline, result })
}

/// Picks the pipeline to run
///
/// Without an explicit name the sole registered pipeline is used.
pub fn resolve_pipeline(registry: &PipelineRegistry, requested: Option<&str>) -> Result<String> {
    let snapshot = registry.snapshot();

    let name = match requested.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => {
            let mut names = snapshot.iter();
            match (names.next(), names.next()) {
                (None, _) => return Err(RunError::NoPipelines),
                (Some(only), None) => only.clone(),
                (Some(_), Some(_)) => return Err(RunError::AmbiguousPipeline),
            }
        }
    };

    if !snapshot.contains(&name) {
        return Err(RunError::PipelineNotFound(name));
    }

    Ok(name)
}

/// Turns the request body into payload text
///
/// An empty body yields an empty payload whatever its declared type.
pub fn decode_payload(content_type: Option<&str>, body: &[u8]) -> Result<String> {
    if body.is_empty() {
        return Ok(String::new());
    }

    let kind = content_type
        .and_then(ContentKind::from_mime)
        .ok_or_else(|| RunError::UnsupportedContentType(content_type.map(str::to_string)))?;

    kind.decode(body)
        .map_err(|source| RunError::InvalidBody { kind, source })
}
