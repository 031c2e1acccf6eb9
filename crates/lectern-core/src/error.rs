//! Error types for the content routing engine

use thiserror::Error;

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while splitting or generating documents
#[derive(Debug, Error)]
pub enum CoreError {
    /// Source file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
