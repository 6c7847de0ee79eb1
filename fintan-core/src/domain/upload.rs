//! Upload domain types
//!
//! Rules for where uploaded files go and which names are acceptable.

/// Extensions (lowercase, with the dot) accepted by the upload endpoint
pub const ALLOWED_EXTENSIONS: [&str; 10] = [
    ".json", ".ttl", ".n3", ".rdf", ".gz", ".zip", ".txt", ".yaml", ".sparql", ".rq",
];

/// Upload destination selected by the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Input data, stored below the uploads directory
    Data,
    /// Pipeline definition or resource, stored in the pipelines directory
    Pipeline,
}

impl UploadKind {
    /// Anything other than `data` targets the pipelines directory.
    /// An absent field means `data`.
    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            None | Some("data") => UploadKind::Data,
            Some(_) => UploadKind::Pipeline,
        }
    }
}

/// Reduces a client supplied filename to a safe base name.
///
/// Only the last path component is kept, whitespace runs become `_`,
/// characters outside `[A-Za-z0-9._-]` are dropped and leading or trailing
/// `.`/`_` are stripped. Returns `None` if nothing usable remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Lowercased extension of `filename` including the dot, if it has one.
pub fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

pub fn extension_allowed(filename: &str) -> bool {
    extension_of(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}
