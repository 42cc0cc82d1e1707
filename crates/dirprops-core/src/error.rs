//! Error types for property aggregation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort an aggregation.
///
/// Every variant describes why the root itself could not be walked.
/// Failures on individual entries below the root never surface here; they
/// are reported as [`EntryError`] items and counted.
#[derive(Debug, Error)]
pub enum PropertiesError {
    /// Permission denied for the root path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Root path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error while resolving the root.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid enumeration options.
    #[error("Invalid enumeration options: {message}")]
    InvalidOptions { message: String },
}

impl PropertiesError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of per-entry enumeration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryErrorKind {
    /// Permission was denied.
    PermissionDenied,
    /// The entry disappeared or its reference is broken.
    NotFound,
    /// Error reading a directory.
    ReadError,
    /// Error reading metadata.
    MetadataError,
}

/// Non-fatal failure for a single entry during enumeration.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct EntryError {
    /// Path of the failing entry, when known.
    pub path: Option<PathBuf>,
    /// Human-readable message.
    pub message: String,
    /// Kind of failure.
    pub kind: EntryErrorKind,
}

impl EntryError {
    /// Create a new entry error.
    pub fn new(path: Option<PathBuf>, message: impl Into<String>, kind: EntryErrorKind) -> Self {
        Self {
            path,
            message: message.into(),
            kind,
        }
    }

    /// Create an entry error from an I/O error, classified by its kind.
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => EntryErrorKind::PermissionDenied,
            std::io::ErrorKind::NotFound => EntryErrorKind::NotFound,
            _ => EntryErrorKind::MetadataError,
        };
        Self {
            message: format!("{}: {error}", path.display()),
            path: Some(path),
            kind,
        }
    }

    /// Create a directory read error.
    pub fn read_error(path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(path, message, EntryErrorKind::ReadError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_error_io() {
        let err = PropertiesError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, PropertiesError::PermissionDenied { .. }));

        let err = PropertiesError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, PropertiesError::NotFound { .. }));

        let err = PropertiesError::io("/test/path", std::io::Error::other("boom"));
        assert!(matches!(err, PropertiesError::Io { .. }));
    }

    #[test]
    fn test_entry_error_io() {
        let err = EntryError::io(
            "/test/secret",
            &std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind, EntryErrorKind::PermissionDenied);
        assert_eq!(err.path.as_deref(), Some(std::path::Path::new("/test/secret")));
        assert!(err.to_string().contains("/test/secret"));
    }
}
