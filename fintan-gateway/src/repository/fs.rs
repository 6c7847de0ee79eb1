//! Filesystem Repository
//!
//! Directory listings, reads and writes used by the services.
//! Writes are plain overwrites: concurrent uploads of the same name
//! race and the last writer wins.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl FsError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        FsError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, FsError>;

/// Lists regular files `<dir>/*.<extension>`
///
/// Fails if `dir` itself cannot be read, so a missing directory is not
/// mistaken for an empty one. Hidden files are skipped.
pub fn glob_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(dir).map_err(|e| FsError::io(dir, e))?;
    if !metadata.is_dir() {
        return Err(FsError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let dir_str = dir
        .to_str()
        .ok_or_else(|| FsError::NonUtf8Path(dir.to_path_buf()))?;
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(dir_str.trim_end_matches('/')),
        Pattern::escape(extension)
    );

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            FsError::Io {
                path,
                source: e.into_error(),
            }
        })?;

        if path.is_file() {
            files.push(path);
        }
    }

    Ok(files)
}

/// Names of the regular files directly inside `dir`, sorted
pub async fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| FsError::io(dir, e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| FsError::io(dir, e))? {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| FsError::io(&entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }

        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

pub async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| FsError::io(path, e))
}

/// Creates `dir` and its parents if absent; an existing directory is fine
pub async fn ensure_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| FsError::io(dir, e))
}

pub async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| FsError::io(path, e))
}
