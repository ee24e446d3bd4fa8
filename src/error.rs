//! Error types for the Digital Rolodex.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by directory operations.
#[derive(Error, Debug)]
pub enum RolodexError {
    /// A field failed validation on add or edit
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Another contact already uses this email (compared case-insensitively)
    #[error("A contact with email '{0}' already exists")]
    DuplicateEmail(String),

    /// No contact matched the lookup key
    #[error("No contact found matching '{0}'")]
    NotFound(String),

    /// Persisting the directory failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors that can occur while writing the contacts file.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize contacts
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The temporary file could not be moved over the target
    #[error("Failed to replace {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with RolodexError
pub type RolodexResult<T> = Result<T, RolodexError>;

/// Convenience type alias for Results with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
