//! BibTeX entry scanner
//!
//! A lenient, brace-counting reader for the common subset of BibTeX:
//! `@type{key, field = {value}, field = "value", ...}`. Preamble, string,
//! and comment blocks are skipped. Field contents are flattened to plain
//! text (braces stripped, whitespace collapsed).

use std::collections::HashMap;

use crate::error::{BibError, Result};

/// One bibliography record, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    /// Entry type, lowercase (`article`, `book`, ...)
    pub entry_type: String,
    /// Citation key
    pub key: String,
    /// Field values, lowercase names, flattened text
    pub fields: HashMap<String, String>,
    /// 1-based line of the `@` sign
    pub line: usize,
}

impl BibEntry {
    /// Look up a field by (case-insensitive) name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// Scanner for BibTeX source text
pub struct BibParser;

impl BibParser {
    /// Parse every entry in `text`, in file order.
    ///
    /// Unknown junk between entries is skipped; an entry whose braces
    /// never close is a hard error since the rest of the file cannot be
    /// attributed.
    pub fn parse(text: &str) -> Result<Vec<BibEntry>> {
        let bytes = text.as_bytes();
        let mut entries = Vec::new();
        let mut pos = 0usize;

        while let Some(at) = find_byte(bytes, pos, b'@') {
            let line = line_of(text, at);
            let mut cursor = at + 1;

            // Entry type runs up to the opening brace
            let type_start = cursor;
            while cursor < bytes.len() && (bytes[cursor].is_ascii_alphanumeric()) {
                cursor += 1;
            }
            let entry_type = text[type_start..cursor].to_lowercase();
            while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
                cursor += 1;
            }
            if entry_type.is_empty() || cursor >= bytes.len() || bytes[cursor] != b'{' {
                pos = at + 1;
                continue;
            }

            let body_start = cursor + 1;
            let body_end = match matching_brace(bytes, cursor) {
                Some(end) => end,
                None => {
                    return Err(BibError::MalformedEntry {
                        line,
                        reason: "unterminated entry body".to_string(),
                    })
                }
            };
            pos = body_end + 1;

            if matches!(entry_type.as_str(), "comment" | "preamble" | "string") {
                continue;
            }

            let body = &text[body_start..body_end];
            let (key, fields_src) = match body.split_once(',') {
                Some((key, rest)) => (key.trim(), rest),
                None => (body.trim(), ""),
            };
            if key.is_empty() {
                continue;
            }

            let mut fields = HashMap::new();
            for segment in split_top_level(fields_src) {
                if let Some((name, value)) = segment.split_once('=') {
                    let name = name.trim().to_lowercase();
                    let value = flatten_value(value);
                    if !name.is_empty() && !value.is_empty() {
                        fields.insert(name, value);
                    }
                }
            }

            entries.push(BibEntry {
                entry_type,
                key: key.to_string(),
                fields,
                line,
            });
        }

        Ok(entries)
    }
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from.min(bytes.len())..]
        .iter()
        .position(|&b| b == needle)
        .map(|i| from + i)
}

fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Index of the brace matching the one at `open`, if any
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, &byte) in bytes.iter().enumerate().skip(open) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a field list at commas outside braces and quotes
fn split_top_level(src: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut start = 0usize;

    for (index, ch) in src.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '"' if depth == 0 => in_quotes = !in_quotes,
            ',' if depth == 0 && !in_quotes => {
                segments.push(&src[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(&src[start..]);
    segments.retain(|s| !s.trim().is_empty());
    segments
}

/// Strip delimiters and braces from a field value, collapse whitespace
fn flatten_value(value: &str) -> String {
    let mut value = value.trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value = &value[1..value.len() - 1];
    }
    value
        .chars()
        .filter(|&c| c != '{' && c != '}')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
