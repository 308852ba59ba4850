//! Error types for docsplit.
//!
//! Library crates use [`DocsplitError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docsplit operations.
#[derive(Debug, thiserror::Error)]
pub enum DocsplitError {
    /// Text bytes could not be decoded by any encoding in the fallback chain.
    #[error("unsupported encoding: input is not valid {}", .tried.join(", "))]
    UnsupportedEncoding { tried: Vec<String> },

    /// A split budget or other run setting was rejected before processing.
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    /// The source document could not be read as its declared format.
    #[error("{format} extraction failed: {message}")]
    Extraction {
        format: &'static str,
        message: String,
    },

    /// An output artifact could not be written.
    #[error("{format} serialization failed: {message}")]
    Serialization {
        format: &'static str,
        message: String,
    },

    /// Configuration file loading or parsing error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocsplitError>;

impl DocsplitError {
    /// Create a config-file error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an invalid-config error from any displayable message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: msg.into(),
        }
    }

    /// Create an extraction error for the given source format.
    pub fn extraction(format: &'static str, msg: impl Into<String>) -> Self {
        Self::Extraction {
            format,
            message: msg.into(),
        }
    }

    /// Create a serialization error for the given output format.
    pub fn serialization(format: &'static str, msg: impl Into<String>) -> Self {
        Self::Serialization {
            format,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DocsplitError::invalid_config("max_bytes must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid config: max_bytes must be positive, got 0"
        );

        let err = DocsplitError::extraction("pdf", "no trailer");
        assert_eq!(err.to_string(), "pdf extraction failed: no trailer");
    }

    #[test]
    fn unsupported_encoding_lists_attempts() {
        let err = DocsplitError::UnsupportedEncoding {
            tried: vec!["utf-8".into(), "windows-1252".into()],
        };
        assert!(err.to_string().contains("utf-8, windows-1252"));
    }
}
