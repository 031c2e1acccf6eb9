//! Quarto artifact generation
//!
//! Writes the split streams out as a pair of Quarto source files: a
//! revealjs slide deck and a notes document with PDF and HTML outputs.
//! The slide stream is passed through the slide segmenter and formatter
//! before writing; the notes stream is written as routed.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::routing::ContentSplitter;
use crate::slides::{SegmenterConfig, SlideFormatter, SlideSegmenter};

/// Configuration for generated Quarto documents
#[derive(Debug, Clone)]
pub struct QuartoConfig {
    /// Revealjs theme name for the slide deck
    pub theme: String,
    /// Slide segmentation settings
    pub segmenter: SegmenterConfig,
}

impl Default for QuartoConfig {
    fn default() -> Self {
        Self {
            theme: "simple".to_string(),
            segmenter: SegmenterConfig::default(),
        }
    }
}

/// Paths of the generated artifact pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// The `<stem>_slides.qmd` file
    pub slides: PathBuf,
    /// The `<stem>_notes.qmd` file
    pub notes: PathBuf,
}

/// Generates the Quarto source files for one lecture document
#[derive(Debug, Clone, Default)]
pub struct QuartoGenerator {
    config: QuartoConfig,
}

impl QuartoGenerator {
    /// Create a generator with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: QuartoConfig) -> Self {
        Self { config }
    }

    /// Split `input` and write `<stem>_slides.qmd` and `<stem>_notes.qmd`
    /// into `output_dir`, creating the directory if needed.
    ///
    /// The splitter is passed in so the caller can read back boundaries,
    /// warnings, and malformed directives after generation.
    pub fn generate(
        &self,
        splitter: &mut ContentSplitter,
        input: &Path,
        output_dir: &Path,
    ) -> Result<GeneratedFiles> {
        if !input.exists() {
            return Err(CoreError::FileNotFound(input.display().to_string()));
        }
        let source = fs::read_to_string(input)?;
        if let Some(parent) = input.parent() {
            if !parent.as_os_str().is_empty() {
                splitter.set_base_dir(parent);
            }
        }
        let streams = splitter.process_directives(&source);

        fs::create_dir_all(output_dir)?;

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "lecture".to_string());
        let title = derive_title(&source).unwrap_or_else(|| stem.clone());

        let sections = SlideSegmenter::with_config(self.config.segmenter.clone())
            .segment(&streams.slides);
        let deck = SlideFormatter::format(&sections);

        let slides_path = output_dir.join(format!("{}_slides.qmd", stem));
        let notes_path = output_dir.join(format!("{}_notes.qmd", stem));

        fs::write(
            &slides_path,
            format!("{}\n{}\n", self.slides_header(&title), deck),
        )?;
        fs::write(
            &notes_path,
            format!("{}\n{}\n", self.notes_header(&title), streams.notes),
        )?;

        Ok(GeneratedFiles {
            slides: slides_path,
            notes: notes_path,
        })
    }

    fn slides_header(&self, title: &str) -> String {
        let mut header = String::new();
        writeln!(header, "---").unwrap();
        writeln!(header, "title: \"{}\"", yaml_escape(title)).unwrap();
        writeln!(header, "format:").unwrap();
        writeln!(header, "  revealjs:").unwrap();
        writeln!(header, "    theme: {}", self.config.theme).unwrap();
        writeln!(header, "    slide-number: true").unwrap();
        writeln!(header, "---").unwrap();
        header
    }

    fn notes_header(&self, title: &str) -> String {
        let mut header = String::new();
        writeln!(header, "---").unwrap();
        writeln!(
            header,
            "title: \"{} - Lecture Notes\"",
            yaml_escape(title)
        )
        .unwrap();
        writeln!(header, "format:").unwrap();
        writeln!(header, "  pdf:").unwrap();
        writeln!(header, "    toc: true").unwrap();
        writeln!(header, "    number-sections: true").unwrap();
        writeln!(header, "  html:").unwrap();
        writeln!(header, "    toc: true").unwrap();
        writeln!(header, "---").unwrap();
        header
    }
}

/// Generate the artifact pair with default settings
pub fn generate_quarto_files(input: &Path, output_dir: &Path) -> Result<GeneratedFiles> {
    let mut splitter = ContentSplitter::new();
    QuartoGenerator::new().generate(&mut splitter, input, output_dir)
}

/// First depth-1 heading outside code fences, if any
fn derive_title(source: &str) -> Option<String> {
    let mut in_fence = false;
    for line in source.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("# ") {
            let text = rest.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

fn yaml_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
