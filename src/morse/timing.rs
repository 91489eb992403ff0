//! Protocol timing and duration classification.
//!
//! All durations are integer multiples of one [`TimeUnit`]:
//!
//! ```text
//! dot          1×
//! dash         3×
//! symbol gap   1×   (between dots/dashes of one letter)
//! letter gap   2×
//! word gap     6×
//! ```
//!
//! The same classifier shape is used for light pulses (dot vs dash) and
//! for button holds (short vs long press).

use super::Symbol;
use crate::config::TIME_UNIT_MS;

/// Base duration of the protocol, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeUnit(u64);

impl TimeUnit {
    /// Create a unit. Zero is clamped to 1 ms so that every derived
    /// threshold stays strictly positive and ordered.
    pub const fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Self(1)
        } else {
            Self(ms)
        }
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub const fn dot(self) -> u64 {
        self.0
    }

    pub const fn dash(self) -> u64 {
        3 * self.0
    }

    pub const fn symbol_gap(self) -> u64 {
        self.0
    }

    pub const fn letter_gap(self) -> u64 {
        2 * self.0
    }

    pub const fn word_gap(self) -> u64 {
        6 * self.0
    }

    /// Pulses at least this long are dashes.
    pub const fn dash_threshold(self) -> u64 {
        self.dash()
    }
}

impl Default for TimeUnit {
    fn default() -> Self {
        Self::from_millis(TIME_UNIT_MS)
    }
}

/// Classify a pulse duration as a dot or a dash.
///
/// Durations reaching the dash threshold (3 units) are dashes; the
/// boundary itself counts as a dash.
pub fn classify(duration_ms: u64, unit: TimeUnit) -> Symbol {
    if duration_ms >= unit.dash_threshold() {
        Symbol::Dash
    } else {
        Symbol::Dot
    }
}

/// Outcome of a button hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    Short,
    Long,
}

/// Classify a button hold against the long-press threshold (inclusive).
pub fn classify_press(held_ms: u64, long_press_ms: u64) -> PressKind {
    if held_ms >= long_press_ms {
        PressKind::Long
    } else {
        PressKind::Short
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_durations_keep_their_order() {
        let unit = TimeUnit::from_millis(200);
        assert_eq!(unit.dot(), 200);
        assert_eq!(unit.dash(), 600);
        assert_eq!(unit.letter_gap(), 400);
        assert_eq!(unit.word_gap(), 1200);
        assert!(unit.dash_threshold() > unit.dot());
        assert!(unit.word_gap() > unit.letter_gap());
        assert!(unit.letter_gap() > unit.symbol_gap());
    }

    #[test]
    fn zero_unit_is_clamped() {
        let unit = TimeUnit::from_millis(0);
        assert_eq!(unit.as_millis(), 1);
        assert!(unit.dash_threshold() > unit.dot());
    }

    #[test]
    fn classify_around_dash_threshold() {
        let unit = TimeUnit::from_millis(200);
        assert_eq!(classify(599, unit), Symbol::Dot);
        assert_eq!(classify(600, unit), Symbol::Dash);
        assert_eq!(classify(601, unit), Symbol::Dash);
    }

    #[test]
    fn classify_extremes() {
        let unit = TimeUnit::from_millis(200);
        assert_eq!(classify(0, unit), Symbol::Dot);
        assert_eq!(classify(u64::MAX, unit), Symbol::Dash);
    }

    #[test]
    fn press_threshold_is_inclusive() {
        assert_eq!(classify_press(999, 1000), PressKind::Short);
        assert_eq!(classify_press(1000, 1000), PressKind::Long);
    }
}
