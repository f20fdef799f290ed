//! Core error types for keyflow-core.
//!
//! This module defines the error hierarchy using thiserror. Storage and
//! validation failures are kept as separate enums so callers can match on
//! the class of failure without string inspection.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for keyflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Storage-specific errors.
///
/// A failed write is propagated as-is: there are no automatic retries, and
/// a multi-step ingestion cascade is not rolled back (earlier documents in
/// the same cascade may already have been rewritten).
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A read or write was rejected by the backing store
    #[error("Store query failed: {0}")]
    QueryFailed(String),

    /// The backing store refused the write for lack of space
    #[error("Store quota exceeded")]
    QuotaExceeded,

    /// The backing store is locked by another process
    #[error("Store is locked")]
    Locked,

    /// The data directory could not be created
    #[error("Data directory unavailable: {0}")]
    DataDirUnavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
///
/// Raised at the ingestion boundary before any document is touched, so a
/// rejected result never leaves partial state behind.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value for a result field
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// A value that must be a finite number was not
    #[error("Non-finite value for '{field}'")]
    NonFinite { field: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => match err.code {
                rusqlite::ErrorCode::DatabaseLocked => StorageError::Locked,
                rusqlite::ErrorCode::DiskFull => StorageError::QuotaExceeded,
                _ => StorageError::QueryFailed(err.to_string()),
            },
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
