//! Content routing for annotated lecture markdown
//!
//! A source document carries lightweight HTML-comment directives that
//! decide where each span of content ends up:
//!
//! - `<!-- SLIDE -->` - forced slide break; routing is unchanged
//! - `<!-- SLIDE-ONLY -->` - following content goes only to the slides
//! - `<!-- NOTES-ONLY -->` - following content goes only to the notes
//! - `<!-- ALL -->` - following content goes to both outputs (the default)
//!
//! Keywords are case-insensitive and tolerate surrounding whitespace
//! inside the comment. A `<!-- INSERT-BIB <path> -->` marker expands into
//! a rendered reference list in both streams.
//!
//! # Example
//!
//! ```
//! use lectern_core::routing::ContentSplitter;
//!
//! let mut splitter = ContentSplitter::new();
//! let streams = splitter.process_directives(
//!     "# Intro\n<!-- NOTES-ONLY -->\nLong derivation.\n<!-- ALL -->\nSummary.",
//! );
//!
//! assert!(streams.slides.contains("Summary."));
//! assert!(!streams.slides.contains("derivation"));
//! assert!(streams.notes.contains("derivation"));
//! ```

pub mod parser;
mod splitter;
mod types;
mod validator;

pub use parser::{DirectiveParser, DirectiveScan};
pub use splitter::ContentSplitter;
pub use types::{
    ContentBlock, ContentMode, DirectiveMatch, MalformedDirective, SplitStreams, StreamInclusion,
};
pub use validator::StructureValidator;

/// Split raw text into slide and notes streams with default settings
pub fn split_text(text: &str) -> SplitStreams {
    ContentSplitter::new().process_directives(text)
}
