//! Shared fixtures for gateway integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use fintan_core::domain::invocation::{InvocationRequest, InvocationResult};
use fintan_gateway::service::dispatcher::DispatchError;
use fintan_gateway::service::{Dispatcher, PipelineRegistry};
use fintan_gateway::{AppState, Config, create_router};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

/// Dispatcher that records every call and answers with a canned result
pub struct RecordingDispatcher {
    pub calls: Mutex<Vec<(PathBuf, InvocationRequest)>>,
    pub exit_code: Option<i32>,
}

impl RecordingDispatcher {
    pub fn new(exit_code: Option<i32>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            exit_code,
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, InvocationRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn run(
        &self,
        definition: &Path,
        request: &InvocationRequest,
    ) -> Result<InvocationResult, DispatchError> {
        self.calls
            .lock()
            .unwrap()
            .push((definition.to_path_buf(), request.clone()));

        Ok(InvocationResult {
            stdout: format!("ran {}", request.pipeline),
            stderr: "diagnostics".to_string(),
            exit_code: self.exit_code,
        })
    }
}

/// A gateway rooted in a temporary directory
pub struct TestGateway {
    pub root: TempDir,
    pub config: Config,
    pub dispatcher: Arc<RecordingDispatcher>,
    pub app: Router,
}

impl TestGateway {
    pub fn new(pipelines: &[&str]) -> Self {
        Self::with_options(pipelines, false, Some(0))
    }

    pub fn with_options(pipelines: &[&str], strict: bool, exit_code: Option<i32>) -> Self {
        let root = TempDir::new().unwrap();
        let pipelines_dir = root.path().join("pipelines");
        let data_dir = root.path().join("data");
        let uploads_dir = root.path().join("uploads");
        for dir in [&pipelines_dir, &data_dir, &uploads_dir] {
            std::fs::create_dir_all(dir).unwrap();
        }
        for name in pipelines {
            std::fs::write(pipelines_dir.join(format!("{}.json", name)), "{}").unwrap();
        }

        let config = Config {
            pipelines_dir: pipelines_dir.clone(),
            data_dir,
            uploads_dir,
            openapi_override: root.path().join("absent-openapi.yaml"),
            strict_exit_status: strict,
            ..Config::default()
        };

        let registry = PipelineRegistry::load(&pipelines_dir).unwrap();
        let dispatcher = Arc::new(RecordingDispatcher::new(exit_code));
        let app = create_router(AppState::new(
            config.clone(),
            registry,
            dispatcher.clone(),
        ));

        Self {
            root,
            config,
            dispatcher,
            app,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn post(uri: &str, content_type: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(body.into()).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub const BOUNDARY: &str = "fintan-test-boundary";

/// Multipart body with text fields followed by one file part
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str)>) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    if let Some((filename, contents)) = file {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n{contents}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

pub fn upload(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
