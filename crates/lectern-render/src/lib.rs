//! # lectern-render
//!
//! Rendering backend for lectern. Locates the Quarto binary and drives
//! `quarto render` synchronously with a caller-supplied timeout,
//! returning the produced artifact path or a structured failure.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use lectern_render::{RenderEngine, RenderFormat};
//!
//! let engine = RenderEngine::detect()?;
//! let artifact = engine.render(
//!     "lecture01_slides.qmd".as_ref(),
//!     RenderFormat::Revealjs,
//!     Duration::from_secs(300),
//! )?;
//! println!("rendered: {}", artifact.display());
//! ```

mod engine;
mod error;

pub use engine::{RenderEngine, RenderFormat};
pub use error::{RenderError, Result};
