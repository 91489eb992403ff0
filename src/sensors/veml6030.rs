//! Minimal VEML6030 ambient light driver.

use crate::error::{Error, SensorError};
use embedded_hal_async::i2c::I2c;

/// 7-bit address with ADDR pin low.
pub const ADDRESS: u8 = 0x10;

const REG_ALS_CONF: u8 = 0x00;
const REG_ALS: u8 = 0x04;

/// Gain ×1, 25 ms integration, interrupts off, powered on.
const ALS_CONF: u16 = 0x0300;

/// Wait before the first reading after configuring: one 25 ms
/// integration period plus a little slack.
pub const SETTLE_MS: u64 = 30;

/// Lux per count for gain ×1 at 25 ms integration.
const LUX_PER_COUNT: f32 = 0.2304;

pub struct Veml6030 {
    address: u8,
}

impl Veml6030 {
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    pub async fn init<I: I2c>(&self, i2c: &mut I) -> Result<(), Error> {
        let [lo, hi] = ALS_CONF.to_le_bytes();
        i2c.write(self.address, &[REG_ALS_CONF, lo, hi])
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(())
    }

    pub async fn read_lux<I: I2c>(&self, i2c: &mut I) -> Result<f32, Error> {
        let mut raw = [0u8; 2];
        i2c.write_read(self.address, &[REG_ALS], &mut raw)
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(u16::from_le_bytes(raw) as f32 * LUX_PER_COUNT)
    }
}
