//! Error types for pagemend.
//!
//! Library crates use [`PagemendError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all pagemend operations.
#[derive(Debug, thiserror::Error)]
pub enum PagemendError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The source document does not exist or cannot be read (pre-pipeline).
    #[error("source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// A single extraction backend failed. Recovered inside the coordinator;
    /// only surfaces in attempt records, never to the caller.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// Every extraction backend failed or returned blank text.
    #[error("no usable text: {detail}")]
    NoUsableText { detail: String },

    /// The rewrite service could not be reached with any configured model.
    /// Recovered locally: the pipeline continues with unrewritten text.
    #[error("rewrite unavailable: {0}")]
    Rewrite(String),

    /// The document writer could not produce the output artifact.
    #[error("writer error: {0}")]
    Writer(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad config value, malformed response, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagemendError>;

impl PagemendError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a `SourceNotFound` error for the given path.
    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Create a `NoUsableText` error from a chain summary.
    pub fn no_usable_text(detail: impl Into<String>) -> Self {
        Self::NoUsableText {
            detail: detail.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
