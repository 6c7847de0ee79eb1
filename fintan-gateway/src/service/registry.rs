//! Pipeline Registry
//!
//! Snapshot of the pipeline names found in the pipelines directory.
//! The snapshot only changes on [`PipelineRegistry::refresh`]; files added or
//! removed by other processes stay invisible until then.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use fintan_core::domain::pipeline::{DEFINITION_EXTENSION, definition_path, pipeline_name_from_path};
use thiserror::Error;

use crate::repository::fs_repository::{self, FsError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read pipelines directory: {0}")]
    Read(#[from] FsError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Registry of available pipelines
///
/// Owned by the application state and shared by handle. Refreshing swaps
/// the whole snapshot, so readers see either the old or the new set.
#[derive(Debug)]
pub struct PipelineRegistry {
    dir: PathBuf,
    snapshot: RwLock<Arc<BTreeSet<String>>>,
}

impl PipelineRegistry {
    /// Scans `dir` and builds the initial snapshot
    ///
    /// An unreadable directory is an error, never an empty registry.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let names = scan(&dir)?;

        tracing::info!(
            "Loaded {} pipeline(s) from {}",
            names.len(),
            dir.display()
        );

        Ok(Self {
            dir,
            snapshot: RwLock::new(Arc::new(names)),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<BTreeSet<String>> {
        let guard = self.snapshot.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Pipeline names in lexicographic order
    pub fn list(&self) -> Vec<String> {
        self.snapshot().iter().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snapshot().contains(name)
    }

    /// Rescans the directory and replaces the snapshot
    ///
    /// On failure the previous snapshot is kept.
    pub fn refresh(&self) -> Result<usize> {
        let names = scan(&self.dir)?;
        let count = names.len();

        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(names);

        tracing::debug!("Pipeline registry refreshed: {} pipeline(s)", count);
        Ok(count)
    }

    /// Definition file backing `name`
    pub fn definition_path(&self, name: &str) -> PathBuf {
        definition_path(&self.dir, name)
    }
}

fn scan(dir: &Path) -> Result<BTreeSet<String>> {
    let names = fs_repository::glob_files(dir, DEFINITION_EXTENSION)?
        .iter()
        .filter_map(|path| pipeline_name_from_path(path))
        .collect();

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "{}").unwrap();
    }

    #[test]
    fn test_list_strips_extension_and_filters() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.json");
        touch(dir.path(), "a.json");
        touch(dir.path(), "c.txt");

        let registry = PipelineRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.list(), vec!["a", "b"]);
        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
    }

    #[test]
    fn test_snapshot_is_stale_until_refresh() {
        let dir = TempDir::new().unwrap();
        let registry = PipelineRegistry::load(dir.path()).unwrap();
        assert!(registry.list().is_empty());

        touch(dir.path(), "late.json");
        assert!(!registry.contains("late"));

        assert_eq!(registry.refresh().unwrap(), 1);
        assert!(registry.contains("late"));
    }

    #[test]
    fn test_failed_refresh_keeps_snapshot() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("pipelines");
        std::fs::create_dir(&dir).unwrap();
        touch(&dir, "p.json");

        let registry = PipelineRegistry::load(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(registry.refresh().is_err());
        assert_eq!(registry.list(), vec!["p"]);
    }

    #[test]
    fn test_missing_directory_fails_to_load() {
        let root = TempDir::new().unwrap();
        assert!(PipelineRegistry::load(root.path().join("absent")).is_err());
    }

    #[test]
    fn test_definition_path() {
        let registry = PipelineRegistry::load(TempDir::new().unwrap().path()).unwrap();
        assert!(registry.definition_path("x").ends_with("x.json"));
    }
}
