//! Error types for Linkdeck.
//!
//! This module defines the error cases surfaced by collection edits, imports,
//! and persistence, with messages suitable for showing to the user directly.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Linkdeck library.
#[derive(Debug, Error)]
pub enum LinkdeckError {
    // Collection edit errors
    #[error("Invalid URL: {url:?}")]
    InvalidUrl { url: String },

    #[error("A link with this URL already exists in \"{category_title}\"")]
    DuplicateUrl { category_title: String },

    #[error("Collection edits are not allowed while move mode is active")]
    MoveModeActive,

    // Import errors
    #[error("Invalid backup file: {reason}")]
    MalformedImport { reason: String },

    #[error("No bookmarks found in the file")]
    NoBookmarksFound,

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Remote persistence errors
    #[error("Remote store error: {message}")]
    Remote {
        message: String,
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
    },
}

/// Result type alias for Linkdeck operations.
pub type Result<T> = std::result::Result<T, LinkdeckError>;

// Conversion implementations for common error types

impl From<std::io::Error> for LinkdeckError {
    fn from(err: std::io::Error) -> Self {
        LinkdeckError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for LinkdeckError {
    fn from(err: serde_json::Error) -> Self {
        LinkdeckError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for LinkdeckError {
    fn from(err: reqwest::Error) -> Self {
        LinkdeckError::Remote {
            message: err.to_string(),
            status: err.status().map(|code| code.as_u16()),
        }
    }
}

impl LinkdeckError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        LinkdeckError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an import error from a human-readable reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        LinkdeckError::MalformedImport {
            reason: reason.into(),
        }
    }

    /// Check if this error came from persistence rather than a bad edit.
    ///
    /// Persistence failures are logged and tolerated; edit errors are shown
    /// to the user so they can correct the input.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            LinkdeckError::Io { .. } | LinkdeckError::Json { .. } | LinkdeckError::Remote { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LinkdeckError::DuplicateUrl {
            category_title: "Development".into(),
        };
        assert_eq!(
            err.to_string(),
            "A link with this URL already exists in \"Development\""
        );
    }

    #[test]
    fn test_invalid_url_display() {
        let err = LinkdeckError::InvalidUrl { url: "   ".into() };
        assert_eq!(err.to_string(), "Invalid URL: \"   \"");
    }

    #[test]
    fn test_persistence_predicate() {
        assert!(LinkdeckError::Remote {
            message: "connection refused".into(),
            status: None,
        }
        .is_persistence());
        assert!(!LinkdeckError::MoveModeActive.is_persistence());
        assert!(!LinkdeckError::malformed("expected an array").is_persistence());
    }
}
