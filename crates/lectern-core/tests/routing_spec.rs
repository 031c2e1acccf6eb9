//! End-to-end behavior of the content routing engine
//!
//! Exercises the full split pipeline the way the CLI drives it: raw
//! annotated markdown in, two routed streams plus diagnostics out.

use lectern_core::{
    generate_quarto_files, ContentMode, ContentSplitter, DirectiveParser, SegmenterConfig,
    SlideSegmenter,
};

#[test]
fn directive_free_document_round_trips_to_both_streams() {
    let text = "# Lecture\n\nFirst paragraph.\n\nSecond paragraph.";
    let mut splitter = ContentSplitter::new();
    let streams = splitter.process_directives(text);

    assert_eq!(streams.slides, text);
    assert_eq!(streams.notes, text);
    assert!(splitter.validation_warnings().is_empty());
    assert!(splitter.malformed_directives().is_empty());
}

#[test]
fn splitter_is_idempotent_on_its_own_output() {
    let text = "# Lecture\n\nBody.\n\nMore body.";
    let first = ContentSplitter::new().process_directives(text);
    let second = ContentSplitter::new().process_directives(&first.slides);

    assert_eq!(second.slides, first.slides);
    assert_eq!(second.notes, first.slides);
}

#[test]
fn exclusive_sections_never_leak_across_streams() {
    let text = "<!-- SLIDE-ONLY -->\nA\n<!-- NOTES-ONLY -->\nB\n<!-- ALL -->\nC";
    let streams = ContentSplitter::new().process_directives(text);

    assert_eq!(streams.slides, "A\n\nC");
    assert_eq!(streams.notes, "B\n\nC");
}

#[test]
fn directive_spelling_variants_parse_identically() {
    let variants = [
        "<!-- slide-only -->",
        "<!--SLIDE-ONLY-->",
        "<!--  SLIDE-ONLY  -->",
    ];
    for text in variants {
        let scan = DirectiveParser::scan(text);
        assert_eq!(scan.directives.len(), 1, "failed for {:?}", text);
        assert_eq!(scan.directives[0].mode, ContentMode::SlidesOnly);
    }
}

#[test]
fn same_line_directives_keep_left_to_right_order() {
    let scan = DirectiveParser::scan("<!-- SLIDE --> mid-text <!-- NOTES-ONLY -->");

    assert_eq!(scan.directives.len(), 2);
    assert_eq!(scan.directives[0].mode, ContentMode::SlideBoundary);
    assert_eq!(scan.directives[1].mode, ContentMode::NotesOnly);
    assert!(scan.directives[0].start < scan.directives[1].start);
    assert_eq!(scan.directives[0].line, scan.directives[1].line);
}

#[test]
fn malformed_directive_is_reported_but_inert() {
    let text = "<!-- SLIDE-ONLY -->\nDeck.\n<!-- NOTE-ONLY -->\nStill deck.\n<!-- ALL -->\nBoth.";
    let mut splitter = ContentSplitter::new();
    let streams = splitter.process_directives(text);

    assert_eq!(splitter.malformed_directives().len(), 1);
    assert_eq!(splitter.malformed_directives()[0].line, 3);
    assert!(splitter.malformed_directives()[0].raw.contains("NOTE-ONLY"));

    // The typo did not switch to notes mode
    assert!(streams.slides.contains("Still deck."));
    assert!(!streams.notes.contains("Still deck."));
}

#[test]
fn unclosed_section_produces_warning_but_output() {
    let text = "shared\n<!-- SLIDE-ONLY -->\ntail";
    let mut splitter = ContentSplitter::new();
    let streams = splitter.process_directives(text);

    assert!(splitter
        .validation_warnings()
        .iter()
        .any(|w| w.starts_with("Unclosed")));
    assert_eq!(streams.slides, "shared\n\ntail");
    assert_eq!(streams.notes, "shared");
}

#[test]
fn missing_bibliography_becomes_placeholder_not_error() {
    let text = "Intro.\n\n<!-- INSERT-BIB missing.bib -->\n\nOutro.";
    let streams = ContentSplitter::new().process_directives(text);

    assert!(streams.notes.contains("missing.bib"));
    assert!(streams.notes.contains("Outro."));
    assert!(!streams.notes.contains("INSERT-BIB"));
}

#[test]
fn two_hundred_word_section_splits_within_budget() {
    let paragraph: String = (0..50).map(|i| format!("w{} ", i)).collect();
    let text = format!(
        "# Single Heading\n\n{p}\n\n{p}\n\n{p}\n\n{p}",
        p = paragraph.trim()
    );

    let sections = SlideSegmenter::with_config(SegmenterConfig { max_words: 150 })
        .segment(&text);

    assert!(sections.len() >= 2);
    for section in &sections {
        assert!(
            section.word_count <= 150,
            "section {:?} is {} words",
            section.title,
            section.word_count
        );
    }
}

#[test]
fn boundary_directive_lines_are_collected_sorted() {
    let text = "a\n<!-- SLIDE -->\nb\n<!-- SLIDE -->\nc";
    let mut splitter = ContentSplitter::new();
    splitter.process_directives(text);

    let lines: Vec<usize> = splitter.slide_boundaries().iter().copied().collect();
    assert_eq!(lines, vec![2, 4]);
}

#[test]
fn generate_quarto_files_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("week05.md");
    std::fs::write(
        &input,
        "# Dynamic Programming\n\n<!-- SLIDE-ONLY -->\nOne-line recap.\n<!-- ALL -->\n\n## Memoization\n\nShared content with $O(n)$ cost.\n\n<!-- NOTES-ONLY -->\nExtended worked example.\n<!-- ALL -->\nWrap-up.",
    )
    .unwrap();

    let files = generate_quarto_files(&input, &dir.path().join("generated")).unwrap();

    let slides = std::fs::read_to_string(&files.slides).unwrap();
    let notes = std::fs::read_to_string(&files.notes).unwrap();

    // Routing respected
    assert!(slides.contains("One-line recap."));
    assert!(!notes.contains("One-line recap."));
    assert!(notes.contains("Extended worked example."));
    assert!(!slides.contains("Extended worked example."));

    // Headers in place
    assert!(slides.contains("title: \"Dynamic Programming\""));
    assert!(notes.contains("Dynamic Programming - Lecture Notes"));

    // Math section picked up speaker notes
    assert!(slides.contains("::: {.notes}"));
    assert!(slides.contains("mathematical expressions"));
}
