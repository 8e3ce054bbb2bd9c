//! Common error types for readlog

use thiserror::Error;

/// Common result type for readlog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the store, config and UI layers
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input (blank form fields, over-long write-up)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entries file exists but could not be read or parsed
    #[error("Error loading data file {path}: {reason}")]
    CorruptStore { path: String, reason: String },
}
