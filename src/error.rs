//! Custom error types for terabox-history.
//!
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for tbh.
pub mod exit_code {
    /// Success.
    pub const SUCCESS: i32 = 0;
    /// General error.
    pub const GENERAL_ERROR: i32 = 1;
    /// Stored history could not be parsed.
    pub const CORRUPT_HISTORY: i32 = 2;
    /// Storage backend failed.
    pub const STORAGE_ERROR: i32 = 3;
    /// Invalid arguments.
    pub const INVALID_INPUT: i32 = 4;
    /// Invalid configuration.
    pub const INVALID_CONFIG: i32 = 5;
}

/// Main error type for terabox-history.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The value stored under the history key is not a valid history list.
    #[error("Stored history under '{key}' is not a valid list: {source}\n\nTip: Set `on_corrupt = \"reset\"` in the [history] config section to discard it automatically.")]
    CorruptHistory {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A zero cap was requested.
    #[error("Maximum number of history items must be at least 1")]
    InvalidMaxItems,

    /// Failed to encode history for storage.
    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Storage backend error with path context.
    #[error("Failed to {operation} '{path}': {source}")]
    Storage {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid configuration file.
    #[error("Invalid config at {path}:\n  {message}\n\nTip: Check the config file syntax and ensure all values are valid.")]
    InvalidConfig { path: PathBuf, message: String },
}

impl HistoryError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            HistoryError::CorruptHistory { .. } => exit_code::CORRUPT_HISTORY,
            HistoryError::InvalidMaxItems => exit_code::INVALID_INPUT,
            HistoryError::Serialize(_) => exit_code::GENERAL_ERROR,
            HistoryError::Storage { .. } => exit_code::STORAGE_ERROR,
            HistoryError::ConfigError { .. } => exit_code::INVALID_CONFIG,
            HistoryError::InvalidConfig { .. } => exit_code::INVALID_CONFIG,
        }
    }

    /// Wrap an IO error with the operation and path that caused it.
    pub fn storage(operation: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HistoryError::Storage {
            operation: operation.to_string(),
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for terabox-history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;
