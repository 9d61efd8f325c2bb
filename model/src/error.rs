//! Structural failures.
//!
//! These end the processing of one input. Semantic findings are never errors
//! of this kind; they are accumulated as [`Diagnostic`](crate::Diagnostic)s.

use thiserror::Error;

/// Errors raised while reading, parsing, or decoding an input.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The input is not parseable as the expected kind.
    #[error("{input}{}: {reason}", line_suffix(.line))]
    Format {
        /// Path or name of the input.
        input: String,
        /// Line of the failure, when known.
        line: Option<u32>,
        /// What went wrong.
        reason: String,
    },

    /// An artifact written by a different toolkit version.
    #[error("artifact was written by toolkit version {found}; this is version {expected}")]
    VersionMismatch {
        /// Version recorded in the artifact header.
        found: String,
        /// Version of the running toolkit.
        expected: String,
    },

    /// A file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// The file.
        path: String,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded.
    #[error("encoding failed: {0}")]
    Encode(String),
}

fn line_suffix(line: &Option<u32>) -> String {
    line.map(|l| format!(":{l}")).unwrap_or_default()
}

impl ModelError {
    /// A format error with no line.
    pub fn format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::Format {
            input: input.into(),
            line: None,
            reason: reason.into(),
        }
    }

    /// A format error at `line`.
    pub fn format_at(input: impl Into<String>, line: u32, reason: impl Into<String>) -> Self {
        ModelError::Format {
            input: input.into(),
            line: Some(line),
            reason: reason.into(),
        }
    }

    /// An I/O error on `path`.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ModelError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is a format error.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, ModelError::Format { .. })
    }
}

/// Result alias used across the toolkit.
pub type Result<T> = std::result::Result<T, ModelError>;
