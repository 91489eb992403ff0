//! Letter ↔ pattern table for the 26 letters of the Latin alphabet.

use super::{push_truncating, SignalString, LETTER_GAP, WORD_GAP};

/// Patterns for `a`..=`z`, indexed by letter offset.
const PATTERNS: [&str; 26] = [
    ".-", "-...", "-.-.", "-..", ".", "..-.", // a-f
    "--.", "....", "..", ".---", "-.-", ".-..", // g-l
    "--", "-.", "---", ".--.", "--.-", ".-.", // m-r
    "...", "-", "..-", "...-", ".--", "-..-", // s-x
    "-.--", "--..", // y-z
];

/// Pattern for a letter (case insensitive), `None` for anything else.
pub fn pattern_for(letter: char) -> Option<&'static str> {
    let lower = letter.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        Some(PATTERNS[(lower as u8 - b'a') as usize])
    } else {
        None
    }
}

/// Lowercase letter for an exact pattern match.
pub fn letter_for(pattern: &str) -> Option<char> {
    PATTERNS
        .iter()
        .position(|&p| p == pattern)
        .map(|i| (b'a' + i as u8) as char)
}

/// Encode plain text by table lookup.
///
/// Letters are separated by a single space and words by the two-space
/// marker the light decoder produces, so the result translates back with
/// [`super::translator::decode`]. A trailing space becomes a trailing word
/// marker; leading spaces are dropped. Characters without a pattern are
/// skipped. Output is truncated at capacity.
pub fn encode_text(text: &str) -> SignalString {
    let mut out = SignalString::new();
    let mut pending_gap: Option<&str> = None;

    for c in text.chars() {
        if c == ' ' {
            if !out.is_empty() {
                pending_gap = Some(WORD_GAP);
            }
            continue;
        }
        let Some(pattern) = pattern_for(c) else {
            continue;
        };
        if let Some(gap) = pending_gap.take() {
            if !push_truncating(&mut out, gap) {
                break;
            }
        }
        if !push_truncating(&mut out, pattern) {
            break;
        }
        pending_gap = Some(LETTER_GAP);
    }

    if pending_gap == Some(WORD_GAP) {
        push_truncating(&mut out, WORD_GAP);
    }

    out
}
