//! Upload Service
//!
//! Places uploaded files. Data files go below the uploads directory,
//! everything else into the pipelines directory, after which the
//! registry is refreshed so new definitions become runnable.

use std::path::{Path, PathBuf};

use fintan_core::domain::upload::{UploadKind, extension_allowed, sanitize_filename};
use thiserror::Error;

use crate::repository::fs_repository::{self, FsError};
use crate::service::registry::{PipelineRegistry, RegistryError};

/// Service error type
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file provided")]
    NoFile,

    #[error("Extension not supported")]
    UnsupportedExtension(String),

    #[error("Invalid pipeline directory name")]
    InvalidPipelineDir(String),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, UploadError>;

/// A file received by the upload endpoint
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub filename: Option<String>,
    pub contents: Vec<u8>,
    pub kind: UploadKind,
    /// Sub-directory of the uploads root for data files
    pub pipeline: Option<String>,
}

/// Stores an upload and returns where it was written
pub async fn store_upload(
    uploads_dir: &Path,
    registry: &PipelineRegistry,
    req: UploadRequest,
) -> Result<PathBuf> {
    let raw_name = req.filename.filter(|n| !n.is_empty()).ok_or(UploadError::NoFile)?;
    let filename = sanitize_filename(&raw_name)
        .ok_or_else(|| UploadError::UnsupportedExtension(raw_name.clone()))?;

    if !extension_allowed(&filename) {
        return Err(UploadError::UnsupportedExtension(filename));
    }

    let pipeline_dir = match req.pipeline.as_deref().filter(|p| !p.is_empty() && *p != ".") {
        Some(raw) => {
            let name = sanitize_filename(raw)
                .ok_or_else(|| UploadError::InvalidPipelineDir(raw.to_string()))?;
            let dir = uploads_dir.join(name);
            fs_repository::ensure_dir(&dir.join("data")).await?;
            dir
        }
        None => uploads_dir.to_path_buf(),
    };

    let target_dir = match req.kind {
        UploadKind::Data => pipeline_dir.join("data"),
        UploadKind::Pipeline => registry.dir().to_path_buf(),
    };
    fs_repository::ensure_dir(&target_dir).await?;

    let target = target_dir.join(&filename);
    fs_repository::write_file(&target, &req.contents).await?;

    tracing::info!(
        "Stored upload '{}' ({} bytes) at {}",
        filename,
        req.contents.len(),
        target.display()
    );

    if req.kind == UploadKind::Pipeline {
        registry.refresh()?;
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Dirs {
        _root: TempDir,
        uploads: PathBuf,
        registry: PipelineRegistry,
    }

    fn dirs() -> Dirs {
        let root = TempDir::new().unwrap();
        let uploads = root.path().join("uploads");
        let pipelines = root.path().join("pipelines");
        std::fs::create_dir_all(&uploads).unwrap();
        std::fs::create_dir_all(&pipelines).unwrap();
        let registry = PipelineRegistry::load(&pipelines).unwrap();
        Dirs {
            _root: root,
            uploads,
            registry,
        }
    }

    fn request(filename: &str, kind: UploadKind) -> UploadRequest {
        UploadRequest {
            filename: Some(filename.to_string()),
            contents: b"content".to_vec(),
            kind,
            pipeline: None,
        }
    }

    #[tokio::test]
    async fn test_data_upload_lands_in_data_dir() {
        let d = dirs();
        let target = store_upload(&d.uploads, &d.registry, request("corpus.ttl", UploadKind::Data))
            .await
            .unwrap();

        assert_eq!(target, d.uploads.join("data").join("corpus.ttl"));
        assert_eq!(std::fs::read(&target).unwrap(), b"content");
    }

    #[tokio::test]
    async fn test_data_upload_with_pipeline_subdir() {
        let d = dirs();
        let mut req = request("corpus.ttl", UploadKind::Data);
        req.pipeline = Some("../escape".to_string());

        let target = store_upload(&d.uploads, &d.registry, req).await.unwrap();
        assert_eq!(target, d.uploads.join("escape").join("data").join("corpus.ttl"));
    }

    #[tokio::test]
    async fn test_pipeline_upload_refreshes_registry() {
        let d = dirs();
        assert!(!d.registry.contains("fresh"));

        store_upload(&d.uploads, &d.registry, request("fresh.json", UploadKind::Pipeline))
            .await
            .unwrap();

        assert!(d.registry.contains("fresh"));
    }

    #[tokio::test]
    async fn test_rejects_traversal_without_allowed_extension() {
        let d = dirs();
        let result = store_upload(
            &d.uploads,
            &d.registry,
            request("../../etc/passwd", UploadKind::Data),
        )
        .await;

        assert!(matches!(result, Err(UploadError::UnsupportedExtension(name)) if name == "passwd"));
        assert!(!d.uploads.join("data").join("passwd").exists());
    }

    #[tokio::test]
    async fn test_missing_file_name() {
        let d = dirs();
        let mut req = request("", UploadKind::Data);
        assert!(matches!(
            store_upload(&d.uploads, &d.registry, req.clone()).await,
            Err(UploadError::NoFile)
        ));

        req.filename = None;
        assert!(matches!(
            store_upload(&d.uploads, &d.registry, req).await,
            Err(UploadError::NoFile)
        ));
    }
}
