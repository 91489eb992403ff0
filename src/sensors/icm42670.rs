//! Minimal ICM-42670-P driver: accelerometer, gyroscope and die
//! temperature in one burst read.

use crate::error::{Error, SensorError};
use crate::sensors::motion::MotionSample;
use embedded_hal_async::i2c::I2c;

/// 7-bit address with AP_AD0 tied high.
pub const ADDRESS: u8 = 0x69;

const REG_TEMP_DATA1: u8 = 0x09;
const REG_PWR_MGMT0: u8 = 0x1F;
const REG_GYRO_CONFIG0: u8 = 0x20;
const REG_ACCEL_CONFIG0: u8 = 0x21;
const REG_WHO_AM_I: u8 = 0x75;

const WHO_AM_I: u8 = 0x67;

/// ±4 g full scale, 100 Hz ODR.
const ACCEL_CONFIG: u8 = 0b0100_1001;
/// ±2000 °/s full scale, 100 Hz ODR.
const GYRO_CONFIG: u8 = 0b0000_1001;
/// Accelerometer and gyroscope in low-noise mode.
const PWR_LOW_NOISE: u8 = 0b0000_1111;

const ACCEL_LSB_PER_G: f32 = 8192.0;
const GYRO_LSB_PER_DPS: f32 = 16.4;

/// Temperature, accel XYZ, gyro XYZ - big-endian i16 each.
const BURST_LEN: usize = 14;

pub struct Icm42670 {
    address: u8,
}

impl Icm42670 {
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    async fn write_reg<I: I2c>(&self, i2c: &mut I, reg: u8, value: u8) -> Result<(), Error> {
        i2c.write(self.address, &[reg, value])
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(())
    }

    /// Check the part ID and start both sensors.
    pub async fn init<I: I2c>(&self, i2c: &mut I) -> Result<(), Error> {
        let mut id = [0u8; 1];
        i2c.write_read(self.address, &[REG_WHO_AM_I], &mut id)
            .await
            .map_err(|_| SensorError::Bus)?;
        if id[0] != WHO_AM_I {
            return Err(SensorError::UnexpectedId(id[0]).into());
        }

        self.write_reg(i2c, REG_ACCEL_CONFIG0, ACCEL_CONFIG).await?;
        self.write_reg(i2c, REG_GYRO_CONFIG0, GYRO_CONFIG).await?;
        self.write_reg(i2c, REG_PWR_MGMT0, PWR_LOW_NOISE).await
    }

    pub async fn read<I: I2c>(&self, i2c: &mut I) -> Result<MotionSample, Error> {
        let mut raw = [0u8; BURST_LEN];
        i2c.write_read(self.address, &[REG_TEMP_DATA1], &mut raw)
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(decode_burst(&raw))
    }
}

fn decode_burst(raw: &[u8; BURST_LEN]) -> MotionSample {
    let word = |i: usize| i16::from_be_bytes([raw[2 * i], raw[2 * i + 1]]) as f32;

    MotionSample {
        temperature: word(0) / 128.0 + 25.0,
        accel: [
            word(1) / ACCEL_LSB_PER_G,
            word(2) / ACCEL_LSB_PER_G,
            word(3) / ACCEL_LSB_PER_G,
        ],
        gyro: [
            word(4) / GYRO_LSB_PER_DPS,
            word(5) / GYRO_LSB_PER_DPS,
            word(6) / GYRO_LSB_PER_DPS,
        ],
    }
}
