// src/utils/text.rs

//! Text cleanup and length-bounded HTML escaping.
//!
//! Cuts only ever fall on grapheme boundaries, so emoji and combined
//! characters survive truncation. Message budgets are measured in UTF-16
//! code units, the unit the Bot API counts in.

use unicode_segmentation::UnicodeSegmentation;

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of `char`s in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Number of UTF-16 code units in `s`. Astral characters count twice.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Longest grapheme-aligned prefix of `text` holding at most `max_chars` chars.
pub fn truncate_graphemes(text: &str, max_chars: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for (idx, grapheme) in text.grapheme_indices(true) {
        let len = char_len(grapheme);
        if used + len > max_chars {
            break;
        }
        used += len;
        end = idx + grapheme.len();
    }
    &text[..end]
}

/// HTML-escape `text` for element content, keeping the escaped result within
/// `max_units` UTF-16 code units. Never splits an entity or a grapheme.
///
/// Returns the escaped text and whether anything was dropped.
pub fn escape_truncated(text: &str, max_units: usize) -> (String, bool) {
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let escaped = html_escape::encode_text(grapheme);
        let len = utf16_len(&escaped);
        if used + len > max_units {
            return (out, true);
        }
        used += len;
        out.push_str(&escaped);
    }
    (out, false)
}

/// HTML-escape a whole string for element content.
pub fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// HTML-escape a value placed inside a double-quoted attribute.
pub fn escape_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}
