//! Error types for the rendering backend

use std::path::PathBuf;

use thiserror::Error;

/// Result type for render operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while invoking the rendering backend
#[derive(Debug, Error)]
pub enum RenderError {
    /// The quarto binary could not be located
    #[error("quarto binary not found on PATH")]
    QuartoNotFound,

    /// The render process exited with a failure status
    #[error("quarto render failed: {stderr}")]
    Failed {
        /// Captured standard error output
        stderr: String,
    },

    /// The render process exceeded the caller-supplied timeout
    #[error("quarto render timed out after {seconds}s")]
    TimedOut {
        /// Timeout that was exceeded
        seconds: u64,
    },

    /// The process succeeded but the expected artifact is absent
    #[error("expected artifact was not produced: {0}")]
    MissingArtifact(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
