//! Intelligent slide segmentation
//!
//! Partitions the slide stream into individual slide sections along
//! heading boundaries, then re-splits any section whose word count
//! exceeds the budget. Oversized sections with no usable split point are
//! kept whole rather than looped on.

use std::collections::VecDeque;

use serde::Serialize;

use crate::math;

/// Fallback title when a document offers no heading to borrow
const FALLBACK_TITLE: &str = "Slides";

/// Tuning knobs for slide segmentation
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Maximum words per slide section before a split is attempted
    pub max_words: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { max_words: 150 }
    }
}

/// One slide's worth of content after segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideSection {
    /// Title derived from the leading heading, or a fallback
    pub title: String,
    /// Body markdown, headings included
    pub body: String,
    /// Whitespace-delimited token count of the body
    pub word_count: usize,
    /// Body contains a fenced code block
    pub has_code: bool,
    /// Body contains inline or display math
    pub has_math: bool,
}

/// Splits the slide stream into sections along heading boundaries
#[derive(Debug, Clone, Default)]
pub struct SlideSegmenter {
    config: SegmenterConfig,
}

/// Working representation of a section while splitting is in progress
struct RawSection<'a> {
    title: String,
    lines: Vec<&'a str>,
}

impl SlideSegmenter {
    /// Create a segmenter with the default word budget
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a segmenter with a custom configuration
    pub fn with_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Partition slide markdown into ordered slide sections
    pub fn segment(&self, markdown: &str) -> Vec<SlideSection> {
        let lines: Vec<&str> = markdown.lines().collect();
        let mut queue: VecDeque<RawSection<'_>> = initial_sections(&lines).into();
        let mut done = Vec::new();

        while let Some(section) = queue.pop_front() {
            let total = section.lines.iter().map(|l| count_words(l)).sum::<usize>();
            if total <= self.config.max_words {
                done.push(section);
                continue;
            }
            match split_point(&section.lines) {
                Some(at) => {
                    let (head, tail) = split_section(section, at);
                    // Head first so output order follows source order
                    queue.push_front(tail);
                    queue.push_front(head);
                }
                None => done.push(section),
            }
        }

        done.into_iter().filter_map(finalize).collect()
    }
}

/// Cut the text into sections at depth-1 and depth-2 headings
fn initial_sections<'a>(lines: &[&'a str]) -> Vec<RawSection<'a>> {
    let first_heading = first_heading_text(lines).unwrap_or_else(|| FALLBACK_TITLE.to_string());

    let mut sections: Vec<RawSection<'a>> = Vec::new();
    let mut current: Option<RawSection<'a>> = None;
    let mut in_fence = false;

    for &line in lines {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        } else if !in_fence {
            if let Some(level) = heading_level(line) {
                if level <= 2 {
                    if let Some(section) = current.take() {
                        sections.push(section);
                    }
                    current = Some(RawSection {
                        title: heading_text(line),
                        lines: Vec::new(),
                    });
                }
            }
        }
        match current.as_mut() {
            Some(section) => section.lines.push(line),
            None => {
                // Preamble before the first qualifying heading
                current = Some(RawSection {
                    title: first_heading.clone(),
                    lines: vec![line],
                });
            }
        }
    }
    if let Some(section) = current {
        sections.push(section);
    }

    sections
}

/// Text of the document's first heading outside code fences
fn first_heading_text(lines: &[&str]) -> Option<String> {
    let mut in_fence = false;
    for &line in lines {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if !in_fence && heading_level(line).is_some() {
            return Some(heading_text(line));
        }
    }
    None
}

/// Find the best line index to split an oversized section at.
///
/// Prefers the sub-heading nearest the word-count midpoint; failing that,
/// the paragraph break nearest the midpoint. Candidates that would leave
/// either half without words are rejected.
fn split_point(lines: &[&str]) -> Option<usize> {
    let words: Vec<usize> = lines.iter().map(|l| count_words(l)).collect();
    let total: usize = words.iter().sum();
    let target = total / 2;

    let mut prefix = 0usize;
    let mut in_fence = false;
    let mut best_heading: Option<(usize, usize)> = None; // (distance, index)
    let mut best_break: Option<(usize, usize)> = None;

    for (index, line) in lines.iter().enumerate() {
        if index > 0 && prefix > 0 && prefix < total && !in_fence {
            let distance = prefix.abs_diff(target);
            if heading_level(line).map_or(false, |level| level >= 3) {
                if best_heading.map_or(true, |(best, _)| distance < best) {
                    best_heading = Some((distance, index));
                }
            } else if line.trim().is_empty() {
                if best_break.map_or(true, |(best, _)| distance < best) {
                    best_break = Some((distance, index));
                }
            }
        }
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        }
        prefix += words[index];
    }

    best_heading.or(best_break).map(|(_, index)| index)
}

/// Split a working section at `at`, synthesizing a title for the tail
fn split_section<'a>(section: RawSection<'a>, at: usize) -> (RawSection<'a>, RawSection<'a>) {
    let RawSection { title, lines } = section;
    let head_lines = lines[..at].to_vec();
    let tail_lines = lines[at..].to_vec();

    let tail_title = tail_lines
        .iter()
        .find(|l| !l.trim().is_empty())
        .and_then(|l| heading_level(l).map(|_| heading_text(l)))
        .unwrap_or_else(|| format!("{} (cont.)", title));

    (
        RawSection {
            title,
            lines: head_lines,
        },
        RawSection {
            title: tail_title,
            lines: tail_lines,
        },
    )
}

/// Turn a working section into its final form; empty sections vanish
fn finalize(section: RawSection<'_>) -> Option<SlideSection> {
    let body = section.lines.join("\n").trim().to_string();
    if body.is_empty() {
        return None;
    }
    let word_count = count_words(&body);
    let fence_lines = body
        .lines()
        .filter(|l| l.trim_start().starts_with("```"))
        .count();

    Some(SlideSection {
        title: section.title,
        has_code: fence_lines >= 2,
        has_math: math::contains_math(&body),
        word_count,
        body,
    })
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// ATX heading depth, or `None` for ordinary lines
fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes == 0 {
        return None;
    }
    let rest = &trimmed[hashes..];
    if rest.is_empty() || rest.starts_with(' ') {
        Some(hashes)
    } else {
        None
    }
}

/// Heading text without markers
fn heading_text(line: &str) -> String {
    let text = line.trim_start().trim_start_matches('#').trim();
    if text.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        text.to_string()
    }
}
