//! Quarto process invocation
//!
//! Treats the document converter as a black box: a `.qmd` file and a
//! target format go in, a rendered artifact path or a failure comes out.
//! The caller supplies the timeout; there are no retries.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{RenderError, Result};

/// Poll interval while waiting for the render process
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// Paginated PDF document
    Pdf,
    /// Standalone HTML page
    Html,
    /// Revealjs slide deck
    Revealjs,
}

impl RenderFormat {
    /// Format name passed to `quarto render --to`
    pub fn as_str(self) -> &'static str {
        match self {
            RenderFormat::Pdf => "pdf",
            RenderFormat::Html => "html",
            RenderFormat::Revealjs => "revealjs",
        }
    }

    /// File extension of the produced artifact
    pub fn extension(self) -> &'static str {
        match self {
            RenderFormat::Pdf => "pdf",
            RenderFormat::Html | RenderFormat::Revealjs => "html",
        }
    }
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to a located quarto installation
#[derive(Debug, Clone)]
pub struct RenderEngine {
    quarto: PathBuf,
}

impl RenderEngine {
    /// Locate quarto on PATH
    pub fn detect() -> Result<Self> {
        let quarto = which::which("quarto").map_err(|_| RenderError::QuartoNotFound)?;
        Ok(Self { quarto })
    }

    /// Use an explicit quarto binary
    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            quarto: path.into(),
        }
    }

    /// Path of the quarto binary in use
    pub fn quarto_path(&self) -> &Path {
        &self.quarto
    }

    /// Render `input` to `format`, waiting at most `timeout`.
    ///
    /// Returns the path of the produced artifact. On timeout the child is
    /// killed before the error is returned.
    pub fn render(&self, input: &Path, format: RenderFormat, timeout: Duration) -> Result<PathBuf> {
        let mut child = Command::new(&self.quarto)
            .arg("render")
            .arg(input)
            .arg("--to")
            .arg(format.as_str())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let deadline = Instant::now() + timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                child.kill().ok();
                child.wait().ok();
                return Err(RenderError::TimedOut {
                    seconds: timeout.as_secs(),
                });
            }
            std::thread::sleep(POLL_INTERVAL);
        };

        if !status.success() {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                pipe.read_to_string(&mut stderr).ok();
            }
            return Err(RenderError::Failed {
                stderr: stderr.trim().to_string(),
            });
        }

        let artifact = input.with_extension(format.extension());
        if !artifact.exists() {
            return Err(RenderError::MissingArtifact(artifact));
        }
        Ok(artifact)
    }
}
