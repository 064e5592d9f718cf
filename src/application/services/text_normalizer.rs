use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::domain::ExtractedText;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Turns raw extracted text into a single line of clean prose.
///
/// Ligatures are folded (NFKC), words split across a line break with a hyphen
/// are re-joined, and every whitespace run becomes one space. Whitespace-only
/// input yields an empty `normalized`, which callers read as "nothing to analyze".
///
/// The hyphen rule cannot tell a split word from a hyphenated compound that
/// happens to wrap: `"well-\nknown"` also becomes `"wellknown"`. PDF line
/// breaks split plain words far more often, so the join is kept. Compounds
/// that do not wrap (`"well-known"`) are untouched.
pub fn normalize(raw: &str) -> ExtractedText {
    let folded: String = raw.nfkc().collect();
    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&folded, "$prefix$suffix");
    let normalized = collapse_whitespace(&de_hyphenated);

    ExtractedText {
        raw: raw.to_string(),
        length: normalized.chars().count(),
        normalized,
    }
}

/// Collapses whitespace runs (newlines and tabs included) to a single space
/// and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }

    out
}
