//! Pipeline domain types

use std::path::{Path, PathBuf};

/// Extension (without the dot) a definition file must carry to be a pipeline.
pub const DEFINITION_EXTENSION: &str = "json";

/// Derives a pipeline name from a definition file path.
///
/// Returns `None` when the file does not carry [`DEFINITION_EXTENSION`]
/// or has no usable base name.
pub fn pipeline_name_from_path(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?;
    if extension != DEFINITION_EXTENSION {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        return None;
    }

    Some(stem.to_string())
}

/// Location of the definition file for `name` inside `dir`.
pub fn definition_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, DEFINITION_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_definition_file() {
        assert_eq!(
            pipeline_name_from_path(Path::new("/srv/pipelines/conll2rdf.json")),
            Some("conll2rdf".to_string())
        );
    }

    #[test]
    fn test_other_extensions_are_not_pipelines() {
        assert_eq!(pipeline_name_from_path(Path::new("notes.txt")), None);
        assert_eq!(pipeline_name_from_path(Path::new("archive.json.gz")), None);
        assert_eq!(pipeline_name_from_path(Path::new("README")), None);
    }

    #[test]
    fn test_definition_path() {
        let path = definition_path(Path::new("pipelines"), "tbx");
        assert_eq!(path, PathBuf::from("pipelines/tbx.json"));
    }
}
