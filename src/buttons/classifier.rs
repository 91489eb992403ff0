//! Per-button press state machine.
//!
//! ```text
//!   Idle ──press edge──▶ Pressed ──poll: released──▶ Classified(Short)
//!    ▲     (debounced)      │                              │
//!    │                      └──poll: held ≥ long──▶ Classified(Long)
//!    └───────────────── release edge ◀─────────────────────┘
//! ```
//!
//! Timestamps are plain milliseconds so the machine can be driven from
//! GPIO edges on target and from scripted timelines in tests.

use crate::buttons::mailbox::EdgeGate;
use crate::config::{BUTTON_DEBOUNCE_MS, BUTTON_LONG_PRESS_MS};
use crate::morse::timing::{classify_press, PressKind};

/// Which physical button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    One,
    Two,
}

/// Classified gesture, as seen by the menu logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonEvent {
    None = 0,
    Button1Short = 1,
    Button1Long = 2,
    Button2Short = 3,
    Button2Long = 4,
}

impl ButtonEvent {
    pub fn new(id: ButtonId, kind: PressKind) -> Self {
        match (id, kind) {
            (ButtonId::One, PressKind::Short) => ButtonEvent::Button1Short,
            (ButtonId::One, PressKind::Long) => ButtonEvent::Button1Long,
            (ButtonId::Two, PressKind::Short) => ButtonEvent::Button2Short,
            (ButtonId::Two, PressKind::Long) => ButtonEvent::Button2Long,
        }
    }

    /// Decode a mailbox value; unknown values read as `None`.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            1 => ButtonEvent::Button1Short,
            2 => ButtonEvent::Button1Long,
            3 => ButtonEvent::Button2Short,
            4 => ButtonEvent::Button2Long,
            _ => ButtonEvent::None,
        }
    }

    pub fn is_none(self) -> bool {
        self == ButtonEvent::None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressPhase {
    Idle,
    Pressed,
    Classified,
}

/// State of one button. Owned by that button's task.
#[derive(Clone, Debug)]
pub struct ButtonState {
    id: ButtonId,
    debounce_ms: u64,
    long_press_ms: u64,
    phase: PressPhase,
    press_start: u64,
    last_edge: Option<u64>,
    long_press_signaled: bool,
}

impl ButtonState {
    pub const fn new(id: ButtonId) -> Self {
        Self::with_timing(id, BUTTON_DEBOUNCE_MS, BUTTON_LONG_PRESS_MS)
    }

    pub const fn with_timing(id: ButtonId, debounce_ms: u64, long_press_ms: u64) -> Self {
        Self {
            id,
            debounce_ms,
            long_press_ms,
            phase: PressPhase::Idle,
            press_start: 0,
            last_edge: None,
            long_press_signaled: false,
        }
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn phase(&self) -> PressPhase {
        self.phase
    }

    pub fn long_press_signaled(&self) -> bool {
        self.long_press_signaled
    }

    fn bounced(&self, now_ms: u64) -> bool {
        matches!(self.last_edge, Some(last) if now_ms.saturating_sub(last) < self.debounce_ms)
    }

    /// Press edge at `now_ms`.
    ///
    /// Returns `true` when the edge is accepted and classification should
    /// start; edges inside the debounce window are dropped without any
    /// state change.
    pub fn press_edge(&mut self, now_ms: u64) -> bool {
        if self.bounced(now_ms) {
            return false;
        }
        self.last_edge = Some(now_ms);
        self.press_start = now_ms;
        self.long_press_signaled = false;
        self.phase = PressPhase::Pressed;
        true
    }

    /// Press edge as seen by the edge watcher: dropped outright while
    /// `gate` is closed, debounced otherwise.
    pub fn gated_press_edge(&mut self, gate: &EdgeGate, now_ms: u64) -> bool {
        gate.is_enabled() && self.press_edge(now_ms)
    }

    /// One classification poll while the press is being timed.
    ///
    /// A hold reaching the long-press threshold is `Long` whether or not
    /// the button is still down; otherwise a released button is `Short`.
    /// Returns `None` while the outcome is still open.
    pub fn poll(&mut self, now_ms: u64, held: bool) -> Option<ButtonEvent> {
        if self.phase != PressPhase::Pressed {
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.press_start);
        let kind = match classify_press(elapsed, self.long_press_ms) {
            PressKind::Long => {
                self.long_press_signaled = true;
                PressKind::Long
            }
            PressKind::Short if !held => PressKind::Short,
            PressKind::Short => return None,
        };
        self.phase = PressPhase::Classified;
        Some(ButtonEvent::new(self.id, kind))
    }

    /// Release edge at `now_ms`.
    ///
    /// The release that ends a long press is swallowed (returns `false`)
    /// so it cannot trigger anything else. Bounces are dropped.
    pub fn release_edge(&mut self, now_ms: u64) -> bool {
        if self.bounced(now_ms) {
            return false;
        }
        self.last_edge = Some(now_ms);
        self.phase = PressPhase::Idle;
        if self.long_press_signaled {
            self.long_press_signaled = false;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> ButtonState {
        ButtonState::with_timing(ButtonId::One, 100, 1000)
    }

    #[test]
    fn bounce_inside_window_is_dropped() {
        let mut b = button();
        assert!(b.press_edge(1000));
        assert!(!b.press_edge(1050));
        assert!(b.press_edge(1100));
    }

    #[test]
    fn first_edge_is_never_a_bounce() {
        let mut b = button();
        assert!(b.press_edge(0));
        assert_eq!(b.phase(), PressPhase::Pressed);
    }

    #[test]
    fn release_before_threshold_is_short() {
        let mut b = button();
        b.press_edge(0);
        assert_eq!(b.poll(200, true), None);
        assert_eq!(b.poll(400, false), Some(ButtonEvent::Button1Short));
        assert_eq!(b.phase(), PressPhase::Classified);
        assert!(b.release_edge(400));
        assert_eq!(b.phase(), PressPhase::Idle);
    }

    #[test]
    fn long_hold_is_long_and_swallows_release() {
        let mut b = ButtonState::with_timing(ButtonId::Two, 100, 1000);
        b.press_edge(0);
        for t in [200, 400, 600, 800] {
            assert_eq!(b.poll(t, true), None);
        }
        assert_eq!(b.poll(1000, true), Some(ButtonEvent::Button2Long));
        assert!(b.long_press_signaled());
        assert!(!b.release_edge(1500));
        assert!(!b.long_press_signaled());
        assert_eq!(b.phase(), PressPhase::Idle);
    }

    #[test]
    fn long_wins_even_if_released_at_threshold() {
        let mut b = button();
        b.press_edge(0);
        assert_eq!(b.poll(1000, false), Some(ButtonEvent::Button1Long));
    }

    #[test]
    fn exactly_one_outcome_per_gesture() {
        let mut b = button();
        b.press_edge(0);
        assert!(b.poll(300, false).is_some());
        assert_eq!(b.poll(500, false), None);
        assert_eq!(b.poll(1500, true), None);
    }

    #[test]
    fn edge_is_dropped_while_gate_closed() {
        let gate = EdgeGate::new();
        let mut b = button();
        gate.disable();
        assert!(!b.gated_press_edge(&gate, 0));
        assert_eq!(b.phase(), PressPhase::Idle);

        assert!(gate.force_enable());
        assert!(b.gated_press_edge(&gate, 10));
        assert_eq!(b.phase(), PressPhase::Pressed);
    }

    #[test]
    fn bounce_during_classification_does_not_restart_press() {
        let gate = EdgeGate::new();
        let mut b = button();
        assert!(b.gated_press_edge(&gate, 0));
        gate.disable();

        // Well outside the debounce window, only the gate stops it.
        assert!(!b.gated_press_edge(&gate, 500));
        assert_eq!(b.poll(1000, true), Some(ButtonEvent::Button1Long));
    }

    #[test]
    fn poll_without_press_does_nothing() {
        let mut b = button();
        assert_eq!(b.poll(5000, false), None);
    }

    #[test]
    fn event_codes_roundtrip_through_u8() {
        for event in [
            ButtonEvent::None,
            ButtonEvent::Button1Short,
            ButtonEvent::Button1Long,
            ButtonEvent::Button2Short,
            ButtonEvent::Button2Long,
        ] {
            assert_eq!(ButtonEvent::from_u8(event as u8), event);
        }
        assert_eq!(ButtonEvent::from_u8(99), ButtonEvent::None);
    }
}
