//! LaTeX math expression extraction and validation
//!
//! Pulls inline (`$...$`) and display (`$$...$$`) expressions out of
//! markdown text and runs lightweight well-formedness checks. Findings
//! are diagnostics for tooling, never fatal.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::routing::parser::line_of;

fn display_pattern() -> &'static Regex {
    static DISPLAY_RE: OnceLock<Regex> = OnceLock::new();
    DISPLAY_RE.get_or_init(|| Regex::new(r"(?s)\$\$(.*?)\$\$").unwrap())
}

fn inline_pattern() -> &'static Regex {
    static INLINE_RE: OnceLock<Regex> = OnceLock::new();
    INLINE_RE.get_or_init(|| Regex::new(r"\$([^$\n]+)\$").unwrap())
}

/// A math expression found in the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MathExpression {
    /// Expression body without the dollar delimiters
    pub text: String,
    /// 1-based line of the opening delimiter
    pub line: usize,
    /// Whether this is a display (`$$...$$`) expression
    pub display: bool,
}

/// Result of scanning a text for math expressions
#[derive(Debug, Clone, Default, Serialize)]
pub struct MathCheck {
    /// Extracted expressions in source order
    pub expressions: Vec<MathExpression>,
    /// Human-readable findings
    pub diagnostics: Vec<String>,
}

/// Extract and validate every math expression in `text`
pub fn validate_math(text: &str) -> MathCheck {
    let mut check = MathCheck::default();

    // Blank out display expressions first so their delimiters are not
    // re-matched as inline pairs
    let mut masked = text.to_string();
    for caps in display_pattern().captures_iter(text) {
        let whole = caps.get(0).expect("regex match has group 0");
        let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let line = line_of(text, whole.start());
        record_expression(&mut check, body, line, true);
        masked.replace_range(whole.range(), &" ".repeat(whole.len()));
    }

    let snapshot = masked.clone();
    for caps in inline_pattern().captures_iter(&snapshot) {
        let whole = caps.get(0).expect("regex match has group 0");
        let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let line = line_of(text, whole.start());
        record_expression(&mut check, body, line, false);
        masked.replace_range(whole.range(), &" ".repeat(whole.len()));
    }

    // Any dollar sign left over has no partner
    for (offset, _) in masked.match_indices('$') {
        check.diagnostics.push(format!(
            "Unterminated math delimiter at line {}",
            line_of(text, offset)
        ));
    }

    check
        .expressions
        .sort_by_key(|expr| (expr.line, !expr.display));
    check
}

/// Quick test for any math content, inline or display
pub fn contains_math(text: &str) -> bool {
    display_pattern().is_match(text) || inline_pattern().is_match(text)
}

fn record_expression(check: &mut MathCheck, body: &str, line: usize, display: bool) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        check
            .diagnostics
            .push(format!("Empty math expression at line {}", line));
    } else if let Some(problem) = brace_problem(trimmed) {
        check
            .diagnostics
            .push(format!("{} in math expression at line {}", problem, line));
    }
    check.expressions.push(MathExpression {
        text: trimmed.to_string(),
        line,
        display,
    });
}

/// Check curly-brace balance, ignoring escaped braces
fn brace_problem(expr: &str) -> Option<&'static str> {
    let mut depth: i64 = 0;
    let mut escaped = false;
    for ch in expr.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Some("Unbalanced closing brace");
                }
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Some("Unbalanced opening brace");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_inline_and_display() {
        let text = "Euler: $e^{i\\pi} + 1 = 0$\n\n$$\\int_0^1 x\\,dx = \\frac{1}{2}$$";
        let check = validate_math(text);

        assert_eq!(check.expressions.len(), 2);
        assert!(!check.expressions[0].display);
        assert_eq!(check.expressions[0].line, 1);
        assert!(check.expressions[1].display);
        assert_eq!(check.expressions[1].line, 3);
        assert!(check.diagnostics.is_empty());
    }

    #[test]
    fn test_display_delimiters_not_double_counted() {
        let check = validate_math("$$a + b$$");
        assert_eq!(check.expressions.len(), 1);
        assert!(check.expressions[0].display);
    }

    #[test]
    fn test_unbalanced_braces_flagged() {
        let check = validate_math("$\\frac{1}{2$");
        assert_eq!(check.diagnostics.len(), 1);
        assert!(check.diagnostics[0].contains("Unbalanced opening brace"));

        let check = validate_math("$x}$");
        assert!(check.diagnostics[0].contains("Unbalanced closing brace"));
    }

    #[test]
    fn test_escaped_braces_are_fine() {
        let check = validate_math("$\\{x\\}$");
        assert!(check.diagnostics.is_empty());
    }

    #[test]
    fn test_unterminated_delimiter() {
        let check = validate_math("price is $5 and rising");
        assert!(check.expressions.is_empty());
        assert_eq!(check.diagnostics.len(), 1);
        assert!(check.diagnostics[0].contains("Unterminated"));
    }

    #[test]
    fn test_contains_math() {
        assert!(contains_math("inline $x+y$ here"));
        assert!(contains_math("$$\\sum_i a_i$$"));
        assert!(!contains_math("no math, just prose"));
        assert!(!contains_math("```\nlet x = 1;\n```"));
    }
}
