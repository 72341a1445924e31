// crates/rubric-gate-core/src/core/text.rs
// ============================================================================
// Module: Submission Text Helpers
// Description: Truncation, word counting, and detection normalization.
// Purpose: Keep every size and gating decision on one shared definition.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! Submissions are untrusted free text. Oversized input is truncated rather
//! than rejected, and the word count used for gating is a plain
//! whitespace-run split. Detection runs on a lower-cased working copy only.

/// Returns the prefix of `text` holding at most `max_chars` characters.
#[must_use]
pub fn clamp_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[.. offset],
        None => text,
    }
}

/// Counts whitespace-delimited words; empty or blank text counts as zero.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Produces the trimmed, lower-cased working copy used by rubric detectors.
#[must_use]
pub fn normalize_for_detection(text: &str) -> String {
    text.trim().to_lowercase()
}
