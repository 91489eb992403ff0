//! Morse symbol model shared by the light codec, the button composer and
//! the text translator.
//!
//! A message under composition is a [`SignalString`]: dots, dashes and
//! spaces. One space separates letters, two (or more) separate words.

pub mod dictionary;
pub mod timing;
pub mod translator;

use crate::config::SIGNAL_CAPACITY;
use heapless::String;

/// Fixed-capacity buffer holding a message in dot/dash/space form.
pub type SignalString = String<SIGNAL_CAPACITY>;

/// Letter boundary marker.
pub const LETTER_GAP: &str = " ";

/// Word boundary marker emitted by the light decoder.
pub const WORD_GAP: &str = "  ";

/// One element of the code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    /// Character used for this symbol inside a [`SignalString`].
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }
}

/// Append `text` to `buf`, stopping at capacity.
///
/// Returns `false` if anything was cut off. The buffer always stays valid.
pub fn push_truncating<const N: usize>(buf: &mut String<N>, text: &str) -> bool {
    for c in text.chars() {
        if buf.push(c).is_err() {
            return false;
        }
    }
    true
}

/// Append a single symbol; `false` when the buffer is full.
pub fn push_symbol<const N: usize>(buf: &mut String<N>, symbol: Symbol) -> bool {
    buf.push(symbol.as_char()).is_ok()
}
