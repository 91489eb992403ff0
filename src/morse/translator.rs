//! SignalString → readable text.

use super::dictionary::letter_for;
use crate::config::SIGNAL_CAPACITY;
use heapless::String;

/// Translated text, bounded like the signal it came from.
pub type Text = String<SIGNAL_CAPACITY>;

/// Translate a dot/dash/space string into lowercase text.
///
/// Space-separated tokens are looked up exactly; unknown tokens are
/// dropped. Two or more spaces after a token mark a word boundary and
/// emit one space. Any non-space character belongs to a token, so a `/`
/// is never a boundary on its own.
pub fn decode(signal: &str) -> Text {
    let mut out = Text::new();
    let mut rest = signal.trim_start_matches(' ');

    while !rest.is_empty() {
        let token_end = rest.find(' ').unwrap_or(rest.len());
        let (token, tail) = rest.split_at(token_end);
        let spaces = tail.len() - tail.trim_start_matches(' ').len();

        if let Some(letter) = letter_for(token) {
            if out.push(letter).is_err() {
                break;
            }
        }
        if spaces >= 2 && out.push(' ').is_err() {
            break;
        }

        rest = &tail[spaces..];
    }

    out
}
