//! Structure checks over the directive sequence
//!
//! Inspects the ordered directive list for unbalanced or suspicious
//! nesting. All findings are advisory: they never abort processing and
//! never alter the block list.

use super::types::{ContentMode, DirectiveMatch};

/// Advisory validator for directive sequences
pub struct StructureValidator;

impl StructureValidator {
    /// Check a directive sequence and return human-readable warnings
    pub fn validate(directives: &[DirectiveMatch]) -> Vec<String> {
        let mut warnings = Vec::new();
        // Currently open exclusive section, if any: (mode, opening line)
        let mut open: Option<(ContentMode, usize)> = None;

        for directive in directives {
            match directive.mode {
                ContentMode::SlidesOnly | ContentMode::NotesOnly => {
                    if let Some((mode, line)) = open {
                        warnings.push(format!(
                            "Nested mode directive: {} at line {} while {} from line {} is still open",
                            directive.mode.keyword(),
                            directive.line,
                            mode.keyword(),
                            line
                        ));
                    }
                    open = Some((directive.mode, directive.line));
                }
                ContentMode::All => {
                    if open.is_none() {
                        warnings.push(format!(
                            "ALL directive at line {} without matching mode directive",
                            directive.line
                        ));
                    }
                    open = None;
                }
                // Boundaries mark slide breaks without touching the mode
                ContentMode::SlideBoundary => {}
            }
        }

        if let Some((mode, line)) = open {
            warnings.push(format!(
                "Unclosed {} section opened at line {}",
                mode.keyword(),
                line
            ));
        }

        warnings
    }
}
