//! Citation rendering
//!
//! Formats parsed bibliography records as single-line markdown citation
//! strings. Missing fields degrade gracefully rather than erroring.

use crate::parser::BibEntry;

/// Renders entries as citation strings
pub struct CitationFormatter;

impl CitationFormatter {
    /// Format one entry as `Authors (Year). Title. *Venue*, pp. N-M.`
    pub fn format(entry: &BibEntry) -> String {
        let authors = entry
            .field("author")
            .map(format_authors)
            .unwrap_or_else(|| entry.key.clone());
        let year = entry.field("year").unwrap_or("n.d.");

        let mut citation = format!("{} ({}).", authors, year);

        if let Some(title) = entry.field("title") {
            citation.push_str(&format!(" {}.", title.trim_end_matches('.')));
        }
        if let Some(venue) = Self::venue(entry) {
            citation.push_str(&format!(" *{}*", venue));
            if let Some(pages) = entry.field("pages") {
                citation.push_str(&format!(", pp. {}", pages.replace("--", "-")));
            }
            citation.push('.');
        }

        citation
    }

    /// Publication venue in priority order, by entry kind
    fn venue(entry: &BibEntry) -> Option<String> {
        entry
            .field("journal")
            .or_else(|| entry.field("booktitle"))
            .or_else(|| entry.field("publisher"))
            .or_else(|| entry.field("school"))
            .map(str::to_string)
    }
}

/// Turn BibTeX `A and B and C` author lists into `A, B, and C`
fn format_authors(raw: &str) -> String {
    let authors: Vec<&str> = raw
        .split(" and ")
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect();

    match authors.len() {
        0 => raw.trim().to_string(),
        1 => authors[0].to_string(),
        2 => format!("{} and {}", authors[0], authors[1]),
        _ => format!(
            "{}, and {}",
            authors[..authors.len() - 1].join(", "),
            authors[authors.len() - 1]
        ),
    }
}
