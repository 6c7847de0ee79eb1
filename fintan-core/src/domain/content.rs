//! Request content kinds
//!
//! A run request declares how its body is encoded via `Content-Type`.
//! Each kind pairs a cheap validity check with the extraction that turns
//! the body into the text piped to the backend.

use std::io::Read;

use flate2::read::GzDecoder;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Supported request body encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// `application/json` object with an optional `text` field
    Json,
    /// `application/gzip` compressed UTF-8 text
    Gzip,
    /// `text/plain` UTF-8 text
    PlainText,
}

/// Errors raised while turning a request body into payload text
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("JSON body must be an object")]
    NotAnObject,

    #[error("JSON field 'text' must be a string")]
    NonStringText,

    #[error("Body is not valid gzip data: {0}")]
    Gzip(#[from] std::io::Error),

    #[error("Body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Request body is empty")]
    EmptyBody,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Json, ContentKind::Gzip, ContentKind::PlainText];

    /// Resolves a `Content-Type` header value.
    ///
    /// Parameters such as `charset` are ignored and matching is case-insensitive.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.mime() == essence)
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ContentKind::Json => "application/json",
            ContentKind::Gzip => "application/gzip",
            ContentKind::PlainText => "text/plain",
        }
    }

    /// Checks that `body` can be handed to [`ContentKind::extract`].
    pub fn validate(&self, body: &[u8]) -> bool {
        match self {
            ContentKind::Json => json_text(body).is_ok(),
            ContentKind::Gzip | ContentKind::PlainText => !body.is_empty(),
        }
    }

    /// Validates `body` and extracts its payload text.
    pub fn decode(&self, body: &[u8]) -> Result<String, DecodeError> {
        if !self.validate(body) {
            return Err(match self.extract(body) {
                Err(e) => e,
                Ok(_) => DecodeError::EmptyBody,
            });
        }

        self.extract(body)
    }

    /// Extracts the payload text from `body`.
    pub fn extract(&self, body: &[u8]) -> Result<String, DecodeError> {
        match self {
            ContentKind::Json => json_text(body),
            ContentKind::Gzip => {
                let mut raw = Vec::new();
                GzDecoder::new(body).read_to_end(&mut raw)?;
                Ok(String::from_utf8(raw)?)
            }
            ContentKind::PlainText => Ok(String::from_utf8(body.to_vec())?),
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime())
    }
}

/// A missing or null `text` field yields an empty payload.
fn json_text(body: &[u8]) -> Result<String, DecodeError> {
    let value: JsonValue = serde_json::from_slice(body)?;
    let JsonValue::Object(map) = value else {
        return Err(DecodeError::NotAnObject);
    };

    match map.get("text") {
        None | Some(JsonValue::Null) => Ok(String::new()),
        Some(JsonValue::String(text)) => Ok(text.clone()),
        Some(_) => Err(DecodeError::NonStringText),
    }
}
