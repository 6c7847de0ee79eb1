//! Invocation domain types
//!
//! An invocation is one run of the backend for one HTTP request.
//! Neither value outlives the request that created it.

use serde::{Deserialize, Serialize};

/// What to run and what to feed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub pipeline: String,
    pub params: Option<String>,
    pub payload: String,
}

impl InvocationRequest {
    pub fn new(pipeline: impl Into<String>, params: Option<String>, payload: String) -> Self {
        Self {
            pipeline: pipeline.into(),
            params,
            payload,
        }
    }

    /// Parameter string to pass with `-p`, if any.
    ///
    /// An empty string counts as no parameters.
    pub fn params(&self) -> Option<&str> {
        self.params.as_deref().filter(|p| !p.is_empty())
    }

    /// Bytes written to the backend's standard input.
    ///
    /// The backend reads until the trailing newline, so it is always appended.
    pub fn stdin_frame(&self) -> String {
        format!("{}\n", self.payload)
    }
}

/// Captured outcome of a backend run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdin_frame_appends_newline() {
        let req = InvocationRequest::new("p", None, "hello".to_string());
        assert_eq!(req.stdin_frame(), "hello\n");

        let empty = InvocationRequest::new("p", None, String::new());
        assert_eq!(empty.stdin_frame(), "\n");
    }

    #[test]
    fn test_empty_params_are_omitted() {
        let req = InvocationRequest::new("p", Some(String::new()), String::new());
        assert_eq!(req.params(), None);

        let req = InvocationRequest::new("p", Some("lang=de".to_string()), String::new());
        assert_eq!(req.params(), Some("lang=de"));
    }

    #[test]
    fn test_signal_exit_is_not_success() {
        let result = InvocationResult {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
        };
        assert!(!result.success());
    }
}
