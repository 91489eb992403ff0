//! Photodiode pulse decoder.
//!
//! Fed with one lux sample per sampling period, the decoder detects
//! on/off transitions against a calibrated baseline, turns each light
//! pulse into a dot or dash and each silence into letter or word gaps.
//!
//! ```text
//!  lux ─┐      ┌──────┐    ┌──┐
//!       │      │ dash │    │.│           (light on  = lux > baseline + margin)
//!       └──────┘      └────┘  └──────────
//!                      ^gap    ^    ^2u: " "   ^6u: "  "
//! ```
//!
//! The decoder owns only per-session state: a new receive session starts
//! from a fresh [`PulseDecoder`] with a freshly measured baseline.

use crate::config::LUX_ON_MARGIN;
use crate::morse::timing::{classify, TimeUnit};
use crate::morse::{push_symbol, push_truncating, SignalString, LETTER_GAP, WORD_GAP};

/// Per-session light decoder state.
#[derive(Clone, Debug)]
pub struct PulseDecoder {
    unit: TimeUnit,
    baseline: f32,
    margin: f32,
    light_on: bool,
    on_start: u64,
    /// Time of the last falling edge; `None` once the word gap was recorded.
    last_transition: Option<u64>,
    letter_gap_recorded: bool,
}

impl PulseDecoder {
    /// Start a session from a single calibration reading taken with the
    /// light off.
    pub fn calibrate(baseline: f32, unit: TimeUnit) -> Self {
        Self::with_margin(baseline, LUX_ON_MARGIN, unit)
    }

    pub fn with_margin(baseline: f32, margin: f32, unit: TimeUnit) -> Self {
        Self {
            unit,
            baseline,
            margin,
            light_on: false,
            on_start: 0,
            last_transition: None,
            letter_gap_recorded: false,
        }
    }

    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    pub fn is_light_on(&self) -> bool {
        self.light_on
    }

    /// Lux level a sample must exceed to count as "on".
    pub fn on_threshold(&self) -> f32 {
        self.baseline + self.margin
    }

    /// Process one sample taken at `now_ms`.
    ///
    /// Symbols and gaps are appended to `signal` (truncating at capacity).
    /// Returns `true` when `signal` changed. Within one call a symbol is
    /// always appended before any gap.
    pub fn sample(&mut self, now_ms: u64, lux: f32, signal: &mut SignalString) -> bool {
        let is_on = lux > self.on_threshold();
        let mut changed = false;

        if is_on && !self.light_on {
            self.on_start = now_ms;
            self.light_on = true;
        } else if !is_on && self.light_on {
            let held = now_ms.saturating_sub(self.on_start);
            push_symbol(signal, classify(held, self.unit));
            changed = true;
            self.light_on = false;
            self.last_transition = Some(now_ms);
        }

        if is_on {
            self.letter_gap_recorded = false;
        } else if let Some(last) = self.last_transition {
            let gap = now_ms.saturating_sub(last);
            if gap >= self.unit.word_gap() {
                push_truncating(signal, WORD_GAP);
                self.last_transition = None;
                changed = true;
            } else if gap >= self.unit.letter_gap() && !self.letter_gap_recorded {
                push_truncating(signal, LETTER_GAP);
                self.letter_gap_recorded = true;
                changed = true;
            }
        }

        changed
    }
}
