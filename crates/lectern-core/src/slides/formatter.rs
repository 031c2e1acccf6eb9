//! Slide deck formatting
//!
//! Renders ordered slide sections back into a single markdown stream with
//! slide separators, attaching auto-generated speaker notes to sections
//! that carry code or math.

use std::fmt::Write;

use super::segmenter::SlideSection;

/// Renders slide sections into presentation markdown
pub struct SlideFormatter;

impl SlideFormatter {
    /// Emit the sections in order, separated by `---` slide breaks
    pub fn format(sections: &[SlideSection]) -> String {
        let mut output = String::new();

        for (index, section) in sections.iter().enumerate() {
            if index > 0 {
                output.push_str("\n\n---\n\n");
            }
            output.push_str(section.body.trim_end());

            if let Some(notes) = Self::speaker_notes(section) {
                write!(output, "\n\n::: {{.notes}}\n{}\n:::", notes).unwrap();
            }
        }

        output
    }

    /// Speaker-notes reminder for sections with complex content
    fn speaker_notes(section: &SlideSection) -> Option<String> {
        let mut reminders = Vec::new();
        if section.has_code {
            reminders.push("Walk through the code examples step by step.");
        }
        if section.has_math {
            reminders.push("Explain the mathematical expressions and their terms.");
        }
        if reminders.is_empty() {
            None
        } else {
            Some(reminders.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(body: &str, has_code: bool, has_math: bool) -> SlideSection {
        SlideSection {
            title: "T".to_string(),
            body: body.to_string(),
            word_count: body.split_whitespace().count(),
            has_code,
            has_math,
        }
    }

    #[test]
    fn test_separators_only_between_sections() {
        let sections = vec![section("# A\n\nx", false, false), section("# B\n\ny", false, false)];
        let output = SlideFormatter::format(&sections);

        assert_eq!(output, "# A\n\nx\n\n---\n\n# B\n\ny");
        assert!(!output.starts_with("---"));
        assert!(!output.ends_with("---"));
    }

    #[test]
    fn test_single_section_has_no_separator() {
        let output = SlideFormatter::format(&[section("# Only\n\nbody", false, false)]);
        assert!(!output.contains("---"));
    }

    #[test]
    fn test_code_section_gets_speaker_notes() {
        let output = SlideFormatter::format(&[section("# C\n\n```rust\nfn f() {}\n```", true, false)]);

        assert!(output.contains("::: {.notes}"));
        assert!(output.contains("code examples"));
        assert!(!output.contains("mathematical expressions"));
        assert!(output.trim_end().ends_with(":::"));
    }

    #[test]
    fn test_math_section_gets_speaker_notes() {
        let output = SlideFormatter::format(&[section("# M\n\n$x^2$", false, true)]);

        assert!(output.contains("mathematical expressions"));
        assert!(!output.contains("code examples"));
    }

    #[test]
    fn test_code_and_math_reminders_combine() {
        let output = SlideFormatter::format(&[section("# Both", true, true)]);

        assert!(output.contains("code examples"));
        assert!(output.contains("mathematical expressions"));
        // One notes block, two reminder lines
        assert_eq!(output.matches("::: {.notes}").count(), 1);
    }

    #[test]
    fn test_plain_section_has_no_notes_block() {
        let output = SlideFormatter::format(&[section("# P\n\nprose", false, false)]);
        assert!(!output.contains("{.notes}"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(SlideFormatter::format(&[]), "");
    }
}
