//! Error types for the store module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while persisting or loading a wallet record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Record serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A wallet already exists at the target and overwriting is disabled.
    #[error("wallet file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// No wallet stored.
    #[error("wallet not found: {0}")]
    NotFound(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
