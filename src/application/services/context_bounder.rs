use crate::domain::{BoundedContext, ExtractedText};

use super::text_normalizer::collapse_whitespace;

pub const DEFAULT_MAX_CONTEXT_LENGTH: usize = 15_000;

/// Cuts normalized text down to `max_context_length` characters.
///
/// The cut lands on a character boundary with no regard for words or
/// sentences, so the last word sent to the model may be partial.
pub fn bound(extracted: &ExtractedText, max_context_length: usize) -> BoundedContext {
    if extracted.length <= max_context_length {
        return BoundedContext {
            text: extracted.normalized.clone(),
            truncated: false,
            original_length: extracted.length,
            sent_length: extracted.length,
        };
    }

    let head: String = extracted
        .normalized
        .chars()
        .take(max_context_length)
        .collect();
    let text = collapse_whitespace(&head);
    let sent_length = text.chars().count();

    tracing::debug!(
        original_length = extracted.length,
        sent_length,
        max_context_length,
        "Context truncated"
    );

    BoundedContext {
        text,
        truncated: true,
        original_length: extracted.length,
        sent_length,
    }
}
