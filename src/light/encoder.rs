//! SignalString → LED on/off schedule.
//!
//! The encoder is the reverse of [`crate::light::decoder`]: it expands a
//! message into timed steps using the same [`TimeUnit`] contract. The
//! blinker task plays the steps on the LED.

use crate::morse::timing::TimeUnit;

/// One step of the LED schedule, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkStep {
    On(u64),
    Off(u64),
}

impl BlinkStep {
    pub fn duration_ms(self) -> u64 {
        match self {
            BlinkStep::On(ms) | BlinkStep::Off(ms) => ms,
        }
    }
}

fn steps_for(c: char, unit: TimeUnit) -> [Option<BlinkStep>; 2] {
    match c {
        '.' => [
            Some(BlinkStep::On(unit.dot())),
            Some(BlinkStep::Off(unit.symbol_gap())),
        ],
        '-' => [
            Some(BlinkStep::On(unit.dash())),
            Some(BlinkStep::Off(unit.symbol_gap())),
        ],
        ' ' | '/' => [Some(BlinkStep::Off(unit.letter_gap())), None],
        _ => [None, None],
    }
}

/// Expand `signal` front to back into LED steps.
///
/// Dots and dashes are followed by a symbol gap; a space or `/` is a
/// letter-gap pause. Other characters produce nothing, and an empty
/// signal yields an empty schedule.
pub fn blink_plan(signal: &str, unit: TimeUnit) -> impl Iterator<Item = BlinkStep> + '_ {
    signal
        .chars()
        .flat_map(move |c| steps_for(c, unit).into_iter().flatten())
}

/// Total playback time of `signal`.
pub fn plan_duration_ms(signal: &str, unit: TimeUnit) -> u64 {
    blink_plan(signal, unit).map(BlinkStep::duration_ms).sum()
}
