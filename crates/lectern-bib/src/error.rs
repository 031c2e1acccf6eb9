//! Error types for bibliography processing

use thiserror::Error;

/// Result type for bibliography operations
pub type Result<T> = std::result::Result<T, BibError>;

/// Errors that can occur while reading a bibliography file
#[derive(Debug, Error)]
pub enum BibError {
    /// File not found
    #[error("Bibliography file not found: {0}")]
    FileNotFound(String),

    /// Entry could not be parsed
    #[error("Malformed entry near line {line}: {reason}")]
    MalformedEntry {
        /// 1-based line of the entry start
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
