//! Lock-free handoff cells between button tasks and the menu logic.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::buttons::classifier::ButtonEvent;

/// Single-slot, latest-value-wins event cell.
///
/// A new event replaces any event that has not been taken yet; there is
/// no history. Taking an event resets the slot to [`ButtonEvent::None`],
/// so each gesture is observed at most once.
pub struct EventMailbox {
    slot: AtomicU8,
}

impl EventMailbox {
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(ButtonEvent::None as u8),
        }
    }

    /// Store `event`, returning the unconsumed event it replaced.
    pub fn publish(&self, event: ButtonEvent) -> ButtonEvent {
        ButtonEvent::from_u8(self.slot.swap(event as u8, Ordering::AcqRel))
    }

    /// Consume the latest event.
    pub fn take(&self) -> ButtonEvent {
        ButtonEvent::from_u8(self.slot.swap(ButtonEvent::None as u8, Ordering::AcqRel))
    }
}

impl Default for EventMailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-button edge enable flag.
///
/// Closed while the button's press is being classified, reopened on
/// release. The health task reopens gates periodically in case a
/// reopen was missed.
pub struct EdgeGate {
    enabled: AtomicBool,
}

impl EdgeGate {
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Reopen the gate; returns `true` if it had been closed.
    pub fn force_enable(&self) -> bool {
        !self.enabled.swap(true, Ordering::AcqRel)
    }
}

impl Default for EdgeGate {
    fn default() -> Self {
        Self::new()
    }
}
