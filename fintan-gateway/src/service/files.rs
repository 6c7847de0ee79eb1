//! Files Service
//!
//! Read-only access to the data directory.

use std::path::Path;

use thiserror::Error;

use crate::repository::fs_repository::{self, FsError};

#[derive(Debug, Error)]
pub enum FilesError {
    #[error("File not found")]
    NotFound(String),

    #[error(transparent)]
    Fs(#[from] FsError),
}

pub type Result<T> = std::result::Result<T, FilesError>;

/// Sorted names of the files in the data directory
pub async fn list_data_files(data_dir: &Path) -> Result<Vec<String>> {
    Ok(fs_repository::list_file_names(data_dir).await?)
}

/// Reads a data file by name
///
/// Only names present in the directory listing are served, so a name can
/// never reach outside the data directory.
pub async fn read_data_file(data_dir: &Path, filename: &str) -> Result<Vec<u8>> {
    let files = list_data_files(data_dir).await?;
    if !files.iter().any(|f| f == filename) {
        return Err(FilesError::NotFound(filename.to_string()));
    }

    match fs_repository::read_file(&data_dir.join(filename)).await {
        Ok(contents) => Ok(contents),
        Err(e) if e.is_not_found() => Err(FilesError::NotFound(filename.to_string())),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_listed_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("out.ttl"), "<a> <b> <c> .").unwrap();

        let contents = read_data_file(dir.path(), "out.ttl").await.unwrap();
        assert_eq!(contents, b"<a> <b> <c> .");
    }

    #[tokio::test]
    async fn test_unlisted_file_is_not_found() {
        let root = TempDir::new().unwrap();
        let data = root.path().join("data");
        std::fs::create_dir(&data).unwrap();
        std::fs::write(root.path().join("secret.txt"), "x").unwrap();

        let result = read_data_file(&data, "../secret.txt").await;
        assert!(matches!(result, Err(FilesError::NotFound(_))));
    }
}
