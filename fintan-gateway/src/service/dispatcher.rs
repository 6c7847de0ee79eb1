//! Invocation Dispatcher
//!
//! Runs the external backend for one request:
//! - Resolves the pipeline definition to an absolute path
//! - Builds `<prefix> -c <definition> [-p <params>]`
//! - Pipes `payload + "\n"` to standard input
//! - Captures standard output and standard error
//!
//! The exit status is recorded but not interpreted here; callers decide
//! what a non-zero exit means.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use fintan_core::domain::invocation::{InvocationRequest, InvocationResult};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to resolve pipeline definition {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start backend {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to collect backend output: {0}")]
    Wait(#[source] std::io::Error),
}

/// Fixed program and leading arguments of every backend invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl BackendCommand {
    /// `<java> -Dfile.encoding=UTF8 -jar <jar>`
    pub fn jar(java: impl Into<PathBuf>, jar: impl AsRef<Path>) -> Self {
        Self {
            program: java.into(),
            args: vec![
                "-Dfile.encoding=UTF8".to_string(),
                "-jar".to_string(),
                jar.as_ref().to_string_lossy().into_owned(),
            ],
        }
    }

    /// Executes `script` directly
    pub fn script(script: impl Into<PathBuf>) -> Self {
        Self {
            program: script.into(),
            args: Vec::new(),
        }
    }

    /// Full argument list after the program for one invocation
    pub fn arguments(&self, definition: &Path, params: Option<&str>) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push("-c".into());
        args.push(definition.as_os_str().to_os_string());

        if let Some(params) = params {
            args.push("-p".into());
            args.push(params.into());
        }

        args
    }
}

/// Runs pipelines on behalf of the HTTP layer
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Runs the pipeline defined at `definition` with the given request
    ///
    /// # Arguments
    /// * `definition` - Path of the pipeline definition file
    /// * `request` - Pipeline name, optional parameters and payload text
    async fn run(
        &self,
        definition: &Path,
        request: &InvocationRequest,
    ) -> Result<InvocationResult, DispatchError>;
}

/// Dispatcher that spawns the backend as a child process
#[derive(Debug, Clone)]
pub struct ProcessDispatcher {
    command: BackendCommand,
    working_dir: PathBuf,
}

impl ProcessDispatcher {
    pub fn new(command: BackendCommand, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            working_dir: working_dir.into(),
        }
    }

    pub fn command(&self) -> &BackendCommand {
        &self.command
    }
}

#[async_trait]
impl Dispatcher for ProcessDispatcher {
    async fn run(
        &self,
        definition: &Path,
        request: &InvocationRequest,
    ) -> Result<InvocationResult, DispatchError> {
        let invocation_id = Uuid::new_v4();

        let definition = tokio::fs::canonicalize(definition)
            .await
            .map_err(|source| DispatchError::Resolve {
                path: definition.to_path_buf(),
                source,
            })?;

        let args = self.command.arguments(&definition, request.params());
        debug!(
            "[{}] Running pipeline '{}': {} {:?} (cwd: {})",
            invocation_id,
            request.pipeline,
            self.command.program.display(),
            args,
            self.working_dir.display()
        );

        let mut child = Command::new(&self.command.program)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| DispatchError::Spawn {
                program: self.command.program.clone(),
                source,
            })?;

        // stdin is written from its own task while output is drained below
        let writer = child.stdin.take().map(|mut stdin| {
            let frame = request.stdin_frame();
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(frame.as_bytes()).await {
                    warn!("[{}] Failed to write backend stdin: {}", invocation_id, e);
                }
            })
        });

        let output = child.wait_with_output().await.map_err(DispatchError::Wait)?;

        if let Some(writer) = writer {
            if let Err(e) = writer.await {
                warn!("[{}] Stdin writer task failed: {}", invocation_id, e);
            }
        }

        let result = InvocationResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };

        let stderr = result.stderr.trim();
        if stderr.is_empty() {
            debug!("[{}] Backend stderr: <empty>", invocation_id);
        } else {
            info!("[{}] Backend stderr:\n{}", invocation_id, stderr);
        }

        if result.success() {
            info!(
                "[{}] Pipeline '{}' finished ({} bytes of output)",
                invocation_id,
                request.pipeline,
                result.stdout.len()
            );
        } else {
            warn!(
                "[{}] Pipeline '{}' exited with status {:?}",
                invocation_id, request.pipeline, result.exit_code
            );
        }

        Ok(result)
    }
}
