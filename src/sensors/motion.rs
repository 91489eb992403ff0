//! Orientation sample and the tilt → symbol rule of the angle composer.

use crate::config::PITCH_DOT_THRESHOLD_DEG;
use crate::morse::Symbol;

/// One IMU reading: acceleration in g, rotation in °/s, temperature in °C.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample {
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
    pub temperature: f32,
}

impl MotionSample {
    /// Pitch angle in degrees from the accelerometer alone.
    pub fn pitch_degrees(&self) -> f32 {
        let [ax, ay, az] = self.accel;
        libm::atan2f(-ax, libm::sqrtf(ay * ay + az * az)).to_degrees()
    }
}

/// Steep tilt is a dot, anything flatter a dash.
pub fn symbol_for_pitch(pitch_deg: f32) -> Symbol {
    if libm::fabsf(pitch_deg) > PITCH_DOT_THRESHOLD_DEG {
        Symbol::Dot
    } else {
        Symbol::Dash
    }
}
