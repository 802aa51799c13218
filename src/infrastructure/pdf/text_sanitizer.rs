use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static LINE_BREAK_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").unwrap());

/// Cleans text pulled out of a PDF: NFKC-normalizes, rejoins words split by
/// end-of-line hyphenation, collapses runs of whitespace and keeps paragraph
/// breaks as single blank lines.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let joined = LINE_BREAK_HYPHEN.replace_all(&normalized, "$head$tail");

    let mut out = String::with_capacity(joined.len());
    let mut pending_break: Option<&str> = None;

    for line in joined.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !out.is_empty() {
                pending_break = Some("\n\n");
            }
            continue;
        }
        if let Some(sep) = pending_break.take() {
            out.push_str(sep);
        } else if !out.is_empty() {
            out.push('\n');
        }
        push_collapsed(trimmed, &mut out);
    }

    out.trim().to_string()
}

fn push_collapsed(line: &str, out: &mut String) {
    let mut in_gap = false;
    for ch in line.chars() {
        if ch.is_whitespace() {
            if !in_gap {
                out.push(' ');
                in_gap = true;
            }
        } else {
            out.push(ch);
            in_gap = false;
        }
    }
}
