//! Core types for the content routing engine

use serde::Serialize;

/// Routing state active at a point in the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentMode {
    /// Content applies to both outputs (the implicit starting mode)
    #[default]
    All,
    /// Forced slide break marker; routing is unchanged
    SlideBoundary,
    /// Content is emitted only to the slide stream
    SlidesOnly,
    /// Content is emitted only to the notes stream
    NotesOnly,
}

/// Which output streams a block of content belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInclusion {
    /// Include in the slide stream
    pub slides: bool,
    /// Include in the notes stream
    pub notes: bool,
}

impl ContentMode {
    /// Map this mode to output-stream inclusion.
    ///
    /// This is the only place modes are translated into stream membership;
    /// a new mode variant forces a decision here.
    pub fn routes_to(self) -> StreamInclusion {
        match self {
            ContentMode::All | ContentMode::SlideBoundary => StreamInclusion {
                slides: true,
                notes: true,
            },
            ContentMode::SlidesOnly => StreamInclusion {
                slides: true,
                notes: false,
            },
            ContentMode::NotesOnly => StreamInclusion {
                slides: false,
                notes: true,
            },
        }
    }

    /// Resolve a normalized (uppercase, whitespace-collapsed) directive keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "SLIDE" => Some(ContentMode::SlideBoundary),
            "SLIDE-ONLY" => Some(ContentMode::SlidesOnly),
            "NOTES-ONLY" => Some(ContentMode::NotesOnly),
            "ALL" => Some(ContentMode::All),
            _ => None,
        }
    }

    /// The canonical keyword spelling for this mode
    pub fn keyword(self) -> &'static str {
        match self {
            ContentMode::All => "ALL",
            ContentMode::SlideBoundary => "SLIDE",
            ContentMode::SlidesOnly => "SLIDE-ONLY",
            ContentMode::NotesOnly => "NOTES-ONLY",
        }
    }

    /// Whether this mode opens a restricted section that expects an `ALL` closer
    pub fn is_exclusive(self) -> bool {
        matches!(self, ContentMode::SlidesOnly | ContentMode::NotesOnly)
    }
}

/// One recognized directive comment in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveMatch {
    /// The mode this directive switches to (or marks, for `SLIDE`)
    pub mode: ContentMode,
    /// 1-based line number of the comment's opening delimiter
    pub line: usize,
    /// Byte offset of `<!--` within the full text
    pub start: usize,
    /// Byte offset just past `-->`
    pub end: usize,
}

/// A comment token that nearly matches a directive keyword
///
/// Malformed directives never participate in mode transitions; they exist
/// only so tooling can point at probable typos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedDirective {
    /// The raw comment text as it appears in the source
    pub raw: String,
    /// 1-based line number
    pub line: usize,
}

/// A contiguous run of source text tagged with one routing mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Mode active while the block was emitted
    pub mode: ContentMode,
    /// Byte offset of the span start within the full text
    pub start: usize,
    /// Byte offset of the span end (exclusive)
    pub end: usize,
    /// 1-based line of the first character of the span
    pub start_line: usize,
    /// 1-based line of the last character of the span
    pub end_line: usize,
    /// Trimmed text content
    pub content: String,
}

/// The two rendered output streams produced by the splitter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitStreams {
    /// Markdown destined for the slide deck
    pub slides: String,
    /// Markdown destined for the notes document
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_routing() {
        assert_eq!(
            ContentMode::All.routes_to(),
            StreamInclusion {
                slides: true,
                notes: true
            }
        );
        assert_eq!(
            ContentMode::SlideBoundary.routes_to(),
            StreamInclusion {
                slides: true,
                notes: true
            }
        );
        assert!(ContentMode::SlidesOnly.routes_to().slides);
        assert!(!ContentMode::SlidesOnly.routes_to().notes);
        assert!(ContentMode::NotesOnly.routes_to().notes);
        assert!(!ContentMode::NotesOnly.routes_to().slides);
    }

    #[test]
    fn test_from_keyword() {
        assert_eq!(
            ContentMode::from_keyword("SLIDE"),
            Some(ContentMode::SlideBoundary)
        );
        assert_eq!(
            ContentMode::from_keyword("SLIDE-ONLY"),
            Some(ContentMode::SlidesOnly)
        );
        assert_eq!(
            ContentMode::from_keyword("NOTES-ONLY"),
            Some(ContentMode::NotesOnly)
        );
        assert_eq!(ContentMode::from_keyword("ALL"), Some(ContentMode::All));
        assert_eq!(ContentMode::from_keyword("NOTE-ONLY"), None);
        assert_eq!(ContentMode::from_keyword("slide"), None);
    }

    #[test]
    fn test_keyword_round_trip() {
        for mode in [
            ContentMode::All,
            ContentMode::SlideBoundary,
            ContentMode::SlidesOnly,
            ContentMode::NotesOnly,
        ] {
            assert_eq!(ContentMode::from_keyword(mode.keyword()), Some(mode));
        }
    }

    #[test]
    fn test_is_exclusive() {
        assert!(ContentMode::SlidesOnly.is_exclusive());
        assert!(ContentMode::NotesOnly.is_exclusive());
        assert!(!ContentMode::All.is_exclusive());
        assert!(!ContentMode::SlideBoundary.is_exclusive());
    }
}
