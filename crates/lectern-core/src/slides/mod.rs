//! Slide deck construction
//!
//! Takes the slides-only markdown stream produced by the content splitter
//! and turns it into presentation markdown: sections are cut along
//! heading boundaries, oversized sections are re-split against a word
//! budget, and the result is joined with slide separators plus speaker
//! notes for complex sections.

mod formatter;
mod segmenter;

pub use formatter::SlideFormatter;
pub use segmenter::{SegmenterConfig, SlideSection, SlideSegmenter};

/// Segment and format a slide stream in one step
pub fn build_slide_deck(markdown: &str, config: SegmenterConfig) -> String {
    let sections = SlideSegmenter::with_config(config).segment(markdown);
    SlideFormatter::format(&sections)
}
