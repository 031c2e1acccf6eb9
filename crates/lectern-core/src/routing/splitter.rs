//! Content splitter: the routing engine facade
//!
//! Combines the directive scan, block segmentation, and structure checks
//! into the two rendered output streams, expanding bibliography insertion
//! markers along the way. A splitter instance serves a single document;
//! construct a fresh one per source file so diagnostics never leak between
//! runs.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::{CoreError, Result};

use super::parser::DirectiveParser;
use super::types::{ContentBlock, ContentMode, MalformedDirective, SplitStreams};
use super::validator::StructureValidator;

fn insert_bib_pattern() -> &'static Regex {
    static INSERT_BIB_RE: OnceLock<Regex> = OnceLock::new();
    INSERT_BIB_RE.get_or_init(|| Regex::new(r"<!--\s*INSERT-BIB\s+(\S+)\s*-->").unwrap())
}

/// Splits one annotated document into slide and notes streams
#[derive(Debug, Clone, Default)]
pub struct ContentSplitter {
    /// Base directory for resolving relative bibliography paths
    base_dir: PathBuf,
    /// Lines carrying a `SLIDE` boundary directive in the last run
    boundaries: BTreeSet<usize>,
    /// Structure warnings from the last run
    warnings: Vec<String>,
    /// Near-miss directive comments from the last run
    malformed: Vec<MalformedDirective>,
}

impl ContentSplitter {
    /// Create a splitter resolving bibliography paths against the
    /// current directory
    pub fn new() -> Self {
        Self::with_base_dir(".")
    }

    /// Create a splitter with an explicit bibliography base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            boundaries: BTreeSet::new(),
            warnings: Vec::new(),
            malformed: Vec::new(),
        }
    }

    /// Change the bibliography base directory
    pub fn set_base_dir(&mut self, base_dir: impl Into<PathBuf>) {
        self.base_dir = base_dir.into();
    }

    /// Route the document's content into the slide and notes streams.
    ///
    /// Blocks are joined with a blank line. A `SLIDE` boundary directive
    /// contributes a `---` separator to the slide stream at its position,
    /// which the downstream renderer treats as a forced slide break.
    /// Bibliography insertion markers are expanded independently in each
    /// stream.
    pub fn process_directives(&mut self, text: &str) -> SplitStreams {
        let scan = DirectiveParser::scan(text);
        self.malformed = scan.malformed;
        self.warnings = StructureValidator::validate(&scan.directives);
        self.boundaries = scan
            .directives
            .iter()
            .filter(|d| d.mode == ContentMode::SlideBoundary)
            .map(|d| d.line)
            .collect();

        let blocks = DirectiveParser::process_content_blocks(text, &scan.directives);
        let breaks: Vec<usize> = scan
            .directives
            .iter()
            .filter(|d| d.mode == ContentMode::SlideBoundary)
            .map(|d| d.start)
            .collect();

        let slides = self.expand_bibliography(&assemble_slides(&blocks, &breaks));
        let notes = self.expand_bibliography(&assemble_notes(&blocks));

        SplitStreams { slides, notes }
    }

    /// Split the file at `path`, resolving relative bibliography paths
    /// against its parent directory
    pub fn split_content(&mut self, path: &Path) -> Result<SplitStreams> {
        if !path.exists() {
            return Err(CoreError::FileNotFound(path.display().to_string()));
        }
        let text = fs::read_to_string(path)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.base_dir = parent.to_path_buf();
            }
        }
        Ok(self.process_directives(&text))
    }

    /// Line numbers of all `SLIDE` boundary directives in the last run
    pub fn slide_boundaries(&self) -> &BTreeSet<usize> {
        &self.boundaries
    }

    /// Structure warnings produced by the last run
    pub fn validation_warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Near-miss directive comments found in the last run
    pub fn malformed_directives(&self) -> &[MalformedDirective] {
        &self.malformed
    }

    /// Replace every `<!-- INSERT-BIB <path> -->` marker with the rendered
    /// bibliography, or a visible notice when the file cannot be read
    fn expand_bibliography(&self, stream: &str) -> String {
        insert_bib_pattern()
            .replace_all(stream, |caps: &Captures<'_>| {
                let bib_path = self.base_dir.join(&caps[1]);
                render_bibliography(&bib_path, &caps[1])
            })
            .into_owned()
    }
}

fn assemble_slides(blocks: &[ContentBlock], breaks: &[usize]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut next_break = 0usize;

    for block in blocks {
        // Emit any boundary that falls before this block, once there is
        // content to break after
        while next_break < breaks.len() && breaks[next_break] < block.start {
            if !parts.is_empty() && parts.last() != Some(&"---") {
                parts.push("---");
            }
            next_break += 1;
        }
        if block.mode.routes_to().slides {
            parts.push(&block.content);
        }
    }

    parts.join("\n\n")
}

fn assemble_notes(blocks: &[ContentBlock]) -> String {
    let parts: Vec<&str> = blocks
        .iter()
        .filter(|b| b.mode.routes_to().notes)
        .map(|b| b.content.as_str())
        .collect();

    parts.join("\n\n")
}

#[cfg(feature = "bibliography")]
fn render_bibliography(path: &Path, raw: &str) -> String {
    match lectern_bib::format_citations(path) {
        Ok(citations) if !citations.is_empty() => {
            let mut out = String::from("## References\n");
            for (index, citation) in citations.iter().enumerate() {
                out.push('\n');
                out.push_str(&format!("{}. {}", index + 1, citation));
            }
            out
        }
        Ok(_) => missing_bibliography_notice(raw),
        Err(_) => missing_bibliography_notice(raw),
    }
}

#[cfg(not(feature = "bibliography"))]
fn render_bibliography(_path: &Path, raw: &str) -> String {
    missing_bibliography_notice(raw)
}

fn missing_bibliography_notice(raw: &str) -> String {
    format!("*[Bibliography not found: {}]*", raw)
}
