use docpilot::infrastructure::pdf::sanitize_extracted_text;

#[test]
fn given_hyphenated_line_break_when_sanitized_then_word_is_rejoined() {
    let raw = "The docu-\nment is long.";

    assert_eq!(sanitize_extracted_text(raw), "The document is long.");
}

#[test]
fn given_repeated_whitespace_when_sanitized_then_it_collapses_to_single_spaces() {
    let raw = "too   many\t\tspaces here";

    assert_eq!(sanitize_extracted_text(raw), "too many spaces here");
}

#[test]
fn given_multiple_blank_lines_when_sanitized_then_one_paragraph_break_remains() {
    let raw = "first paragraph\n\n\n\nsecond paragraph";

    assert_eq!(
        sanitize_extracted_text(raw),
        "first paragraph\n\nsecond paragraph"
    );
}

#[test]
fn given_compatibility_characters_when_sanitized_then_they_are_normalized() {
    // Ligature "ﬁ" decomposes to "fi" under NFKC.
    let raw = "ﬁnancial report";

    assert_eq!(sanitize_extracted_text(raw), "financial report");
}

#[test]
fn given_only_whitespace_when_sanitized_then_result_is_empty() {
    assert_eq!(sanitize_extracted_text("  \n \t \n"), "");
}
