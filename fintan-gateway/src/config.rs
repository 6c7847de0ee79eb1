//! Gateway configuration
//!
//! Every setting is a long flag with an environment variable fallback,
//! so container deployments can configure the gateway through `FINTAN_*`
//! variables alone.

use std::path::PathBuf;

use clap::Parser;

use crate::service::dispatcher::BackendCommand;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PIPELINES_DIR: &str = "./pipelines/";
pub const DEFAULT_DATA_DIR: &str = "./";
pub const DEFAULT_UPLOADS_DIR: &str = "./";
pub const DEFAULT_BACKEND_DIR: &str = "./fintan-backend/";
pub const DEFAULT_BACKEND_JAR: &str = "fintan-backend.jar";
pub const DEFAULT_JAVA: &str = "java";
pub const DEFAULT_OPENAPI_OVERRIDE: &str = "/fintan/openapi.yaml";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Gateway configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "fintan-gateway")]
#[command(about = "HTTP front-end for running Fintan pipelines", long_about = None)]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "FINTAN_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: String,

    /// Directory holding pipeline definitions (`<name>.json`)
    #[arg(long, env = "FINTAN_PIPELINES", default_value = DEFAULT_PIPELINES_DIR)]
    pub pipelines_dir: PathBuf,

    /// Directory listed and served by `/api/files`
    #[arg(long, env = "FINTAN_DATA", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Root directory for `type=data` uploads
    #[arg(long, env = "FINTAN_UPLOADS", default_value = DEFAULT_UPLOADS_DIR)]
    pub uploads_dir: PathBuf,

    /// Backend installation root
    #[arg(long, env = "FINTAN_PATH", default_value = DEFAULT_BACKEND_DIR)]
    pub backend_dir: PathBuf,

    /// Backend archive name inside the backend root
    #[arg(long, env = "FINTAN_JAR", default_value = DEFAULT_BACKEND_JAR)]
    pub backend_jar: String,

    /// Run this script from the backend root instead of the archive
    #[arg(long, env = "FINTAN_RUN_SCRIPT")]
    pub backend_script: Option<String>,

    /// Interpreter used to launch the archive
    #[arg(long, env = "FINTAN_JAVA", default_value = DEFAULT_JAVA)]
    pub java: String,

    /// Working directory of the backend process
    #[arg(long, env = "FINTAN_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// API description served in preference to the bundled one, if present
    #[arg(long, env = "FINTAN_OPENAPI", default_value = DEFAULT_OPENAPI_OVERRIDE)]
    pub openapi_override: PathBuf,

    /// Answer 502 when the backend exits with a non-zero status
    #[arg(
        long,
        env = "FINTAN_STRICT_EXIT",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub strict_exit_status: bool,

    /// Maximum accepted request body size in bytes
    #[arg(long, env = "FINTAN_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Config {
    /// Command prefix used for every backend invocation
    ///
    /// Paths are made absolute because the backend runs in [`Config::working_dir`].
    pub fn backend_command(&self) -> anyhow::Result<BackendCommand> {
        let backend_dir = std::path::absolute(&self.backend_dir)?;

        let command = match &self.backend_script {
            Some(script) => BackendCommand::script(backend_dir.join(script)),
            None => BackendCommand::jar(&self.java, backend_dir.join(&self.backend_jar)),
        };

        Ok(command)
    }

    /// Working directory of the backend process
    ///
    /// Defaults to the backend root for the script variant and to the data
    /// directory for the archive variant.
    pub fn working_dir(&self) -> PathBuf {
        match (&self.workdir, &self.backend_script) {
            (Some(dir), _) => dir.clone(),
            (None, Some(_)) => self.backend_dir.clone(),
            (None, None) => self.data_dir.clone(),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.trim().is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.pipelines_dir.as_os_str().is_empty() {
            anyhow::bail!("pipelines_dir cannot be empty");
        }

        if self.backend_script.is_none() && self.backend_jar.trim().is_empty() {
            anyhow::bail!("backend_jar cannot be empty when no backend_script is set");
        }

        if self.backend_script.as_deref().is_some_and(|s| s.trim().is_empty()) {
            anyhow::bail!("backend_script cannot be empty");
        }

        if self.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            pipelines_dir: PathBuf::from(DEFAULT_PIPELINES_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            backend_dir: PathBuf::from(DEFAULT_BACKEND_DIR),
            backend_jar: DEFAULT_BACKEND_JAR.to_string(),
            backend_script: None,
            java: DEFAULT_JAVA.to_string(),
            workdir: None,
            openapi_override: PathBuf::from(DEFAULT_OPENAPI_OVERRIDE),
            strict_exit_status: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
