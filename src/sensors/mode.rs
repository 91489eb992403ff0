//! Which sensor job is active.
//!
//! The controller writes the mode, the sensor task reads it. The light
//! receiver checks it once per sample period and stops at the first
//! check after the mode leaves [`SensorMode::Lux`].

use core::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SensorMode {
    Idle = 0,
    /// One-shot orientation read.
    Angle = 1,
    /// Continuous light-pulse receiving.
    Lux = 2,
}

impl SensorMode {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => SensorMode::Angle,
            2 => SensorMode::Lux,
            _ => SensorMode::Idle,
        }
    }
}

pub struct ModeFlag {
    mode: AtomicU8,
}

impl ModeFlag {
    pub const fn new() -> Self {
        Self {
            mode: AtomicU8::new(SensorMode::Idle as u8),
        }
    }

    pub fn get(&self) -> SensorMode {
        SensorMode::from_u8(self.mode.load(Ordering::Acquire))
    }

    pub fn set(&self, mode: SensorMode) {
        self.mode.store(mode as u8, Ordering::Release);
    }

    /// Move from `current` to `next` only if nobody changed the mode
    /// in between. Returns `true` on success.
    pub fn finish(&self, current: SensorMode, next: SensorMode) -> bool {
        self.mode
            .compare_exchange(current as u8, next as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for ModeFlag {
    fn default() -> Self {
        Self::new()
    }
}
