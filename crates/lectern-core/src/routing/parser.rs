//! Directive scanner for annotated lecture markdown

use std::sync::OnceLock;

use regex::Regex;
use strsim::damerau_levenshtein;

use super::types::{ContentBlock, ContentMode, DirectiveMatch, MalformedDirective};

/// Recognized directive keywords (normalized spelling)
const KEYWORDS: [&str; 4] = ["SLIDE", "SLIDE-ONLY", "NOTES-ONLY", "ALL"];

fn comment_pattern() -> &'static Regex {
    static COMMENT_RE: OnceLock<Regex> = OnceLock::new();
    COMMENT_RE.get_or_init(|| Regex::new(r"(?s)<!--(.*?)-->").unwrap())
}

/// Result of scanning a document for directive comments
#[derive(Debug, Clone, Default)]
pub struct DirectiveScan {
    /// Recognized directives, ordered by ascending character offset
    pub directives: Vec<DirectiveMatch>,
    /// Comment tokens that nearly match a keyword but do not parse as one
    pub malformed: Vec<MalformedDirective>,
}

/// Scanner for mode-changing directive comments
pub struct DirectiveParser;

impl DirectiveParser {
    /// Scan raw text for directive comments.
    ///
    /// Returns every recognized directive in source order together with the
    /// comment tokens that look like botched directives. Comments unrelated
    /// to any keyword are ignored entirely.
    pub fn scan(text: &str) -> DirectiveScan {
        let mut scan = DirectiveScan::default();

        for caps in comment_pattern().captures_iter(text) {
            let whole = caps.get(0).expect("regex match has group 0");
            let inner = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let normalized = Self::normalize(inner);
            let line = line_of(text, whole.start());

            if let Some(mode) = ContentMode::from_keyword(&normalized) {
                scan.directives.push(DirectiveMatch {
                    mode,
                    line,
                    start: whole.start(),
                    end: whole.end(),
                });
            } else if Self::is_near_keyword(&normalized) {
                scan.malformed.push(MalformedDirective {
                    raw: whole.as_str().to_string(),
                    line,
                });
            }
        }

        scan
    }

    /// Partition the document into mode-tagged blocks.
    ///
    /// The text is cut at every directive; each span carries the mode that
    /// was active when its content was emitted, so a directive only affects
    /// the text after it. Directive tokens consume their own character
    /// ranges and never appear in block content. Spans that trim to nothing
    /// are dropped.
    pub fn process_content_blocks(text: &str, directives: &[DirectiveMatch]) -> Vec<ContentBlock> {
        let mut blocks = Vec::new();
        let mut mode = ContentMode::All;
        let mut cursor = 0usize;

        for directive in directives {
            push_block(&mut blocks, text, cursor, directive.start, mode);
            if directive.mode != ContentMode::SlideBoundary {
                mode = directive.mode;
            }
            cursor = directive.end;
        }
        push_block(&mut blocks, text, cursor, text.len(), mode);

        blocks
    }

    /// Normalize a comment's inner text: trim, fold case, collapse whitespace
    fn normalize(inner: &str) -> String {
        inner
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase()
    }

    /// Whether a normalized comment body is one small edit away from a keyword.
    ///
    /// Distance 1 covers a substituted separator (`SLIDE_ONLY`), a missing
    /// letter (`NOTE-ONLY`), and a transposition (`SILDE`). Distance 0 is a
    /// real directive and anything farther is an ordinary comment.
    fn is_near_keyword(normalized: &str) -> bool {
        !normalized.is_empty()
            && KEYWORDS
                .iter()
                .any(|keyword| damerau_levenshtein(normalized, keyword) == 1)
    }
}

/// 1-based line number for a byte offset: preceding newlines plus one
pub(crate) fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

fn push_block(
    blocks: &mut Vec<ContentBlock>,
    text: &str,
    start: usize,
    end: usize,
    mode: ContentMode,
) {
    if start >= end {
        return;
    }
    let raw = &text[start..end];
    let content = raw.trim();
    if content.is_empty() {
        return;
    }
    blocks.push(ContentBlock {
        mode,
        start,
        end,
        start_line: line_of(text, start),
        end_line: line_of(text, end - 1),
        content: content.to_string(),
    });
}
