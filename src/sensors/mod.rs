//! Orientation and ambient light sensing.
//!
//! Both sensors share one I²C bus. Every access goes through
//! [`SensorBus`], an async mutex; callers wait for it without a timeout.
//!
//! ## Components
//!
//! - **ICM-42670**: accelerometer/gyroscope, used by the angle composer
//! - **VEML6030**: ambient light, used by the light-pulse receiver
//! - **Sensor task**: runs whatever [`SensorMode`] the controller selects

pub mod bus;
pub mod icm42670;
pub mod mode;
pub mod motion;
pub mod task;
pub mod veml6030;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use mode::{ModeFlag, SensorMode};

pub use bus::Sensors;

/// Shared sensor bus lock.
pub type SensorBus<I2C> = Mutex<CriticalSectionRawMutex, Sensors<I2C>>;

/// Controller → sensor task requests and the pitch reply slot.
pub struct SensorControl {
    mode: ModeFlag,
    wake: Signal<CriticalSectionRawMutex, ()>,
    pitch: Signal<CriticalSectionRawMutex, f32>,
    aborted: Signal<CriticalSectionRawMutex, ()>,
}

impl SensorControl {
    pub const fn new() -> Self {
        Self {
            mode: ModeFlag::new(),
            wake: Signal::new(),
            pitch: Signal::new(),
            aborted: Signal::new(),
        }
    }

    pub fn mode(&self) -> SensorMode {
        self.mode.get()
    }

    /// Switch mode and wake the sensor task.
    pub fn request(&self, mode: SensorMode) {
        self.mode.set(mode);
        self.wake.signal(());
    }

    /// Leave `current` for Idle unless a newer request replaced it.
    pub fn finish(&self, current: SensorMode) {
        self.mode.finish(current, SensorMode::Idle);
    }

    /// Give up on `current` without a controller request and tell the
    /// controller, so its view of the mode is corrected.
    pub fn abort(&self, current: SensorMode) {
        if self.mode.finish(current, SensorMode::Idle) {
            self.aborted.signal(());
        }
    }

    pub async fn wait_aborted(&self) {
        self.aborted.wait().await
    }

    pub async fn wait_for_request(&self) {
        self.wake.wait().await
    }

    /// Drop any stale pitch so the next `wait_pitch` sees a fresh one.
    pub fn reset_pitch(&self) {
        self.pitch.reset();
    }

    pub fn publish_pitch(&self, pitch_deg: f32) {
        self.pitch.signal(pitch_deg);
    }

    pub async fn wait_pitch(&self) -> f32 {
        self.pitch.wait().await
    }
}
