//! Error types shared across the FunFam workspace

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, FunfamError>;

/// Main error type for shared FunFam types
#[derive(Error, Debug)]
pub enum FunfamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    #[error("Malformed hit record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Invalid task identifier: {0:?}")]
    InvalidTaskId(String),
}
