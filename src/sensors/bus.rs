//! The sensor I²C bus together with the drivers on it.
//!
//! The two parts are brought up independently: a missing IMU must not
//! leave the light sensor unconfigured, and the other way round.

use crate::error::Error;
use crate::sensors::icm42670::{self, Icm42670};
use crate::sensors::motion::MotionSample;
use crate::sensors::veml6030::{self, Veml6030};
use embedded_hal_async::i2c::I2c;

pub struct Sensors<I2C> {
    i2c: I2C,
    imu: Icm42670,
    light: Veml6030,
}

/// Outcome of bringing up each sensor.
#[derive(Debug)]
pub struct InitReport {
    pub imu: Result<(), Error>,
    pub light: Result<(), Error>,
}

impl<I2C: I2c> Sensors<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            imu: Icm42670::new(icm42670::ADDRESS),
            light: Veml6030::new(veml6030::ADDRESS),
        }
    }

    /// Initialise both parts; one failing does not skip the other.
    pub async fn init(&mut self) -> InitReport {
        let imu = self.imu.init(&mut self.i2c).await;
        let light = self.init_light().await;
        InitReport { imu, light }
    }

    /// (Re)write the light sensor configuration. Also done at the start of
    /// every receive session, so a sensor that was absent or power-cycled
    /// since boot still gets configured.
    pub async fn init_light(&mut self) -> Result<(), Error> {
        self.light.init(&mut self.i2c).await
    }

    pub async fn read_motion(&mut self) -> Result<MotionSample, Error> {
        self.imu.read(&mut self.i2c).await
    }

    pub async fn read_lux(&mut self) -> Result<f32, Error> {
        self.light.read_lux(&mut self.i2c).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SensorError;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    /// I²C bus with a fixed set of responding addresses and register contents.
    struct FakeBus {
        present: Vec<u8>,
        registers: Vec<((u8, u8), Vec<u8>)>,
        writes: Vec<(u8, Vec<u8>)>,
    }

    impl FakeBus {
        fn new(present: &[u8]) -> Self {
            Self {
                present: present.to_vec(),
                registers: Vec::new(),
                writes: Vec::new(),
            }
        }

        fn with_register(mut self, address: u8, reg: u8, bytes: &[u8]) -> Self {
            self.registers.push(((address, reg), bytes.to_vec()));
            self
        }
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if !self.present.contains(&address) {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            let mut reg = 0;
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        reg = bytes[0];
                        self.writes.push((address, bytes.to_vec()));
                    }
                    Operation::Read(buf) => {
                        buf.fill(0);
                        if let Some((_, data)) =
                            self.registers.iter().find(|(key, _)| *key == (address, reg))
                        {
                            buf[..data.len()].copy_from_slice(data);
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn missing_imu_still_configures_light_sensor() {
        let mut sensors = Sensors::new(FakeBus::new(&[veml6030::ADDRESS]));
        let report = block_on(sensors.init());

        assert!(matches!(report.imu, Err(Error::Sensor(SensorError::Bus))));
        assert!(report.light.is_ok());
        assert!(sensors
            .i2c
            .writes
            .contains(&(veml6030::ADDRESS, vec![0x00, 0x00, 0x03])));
    }

    #[test]
    fn wrong_imu_id_is_reported_alongside_light_result() {
        let bus = FakeBus::new(&[icm42670::ADDRESS, veml6030::ADDRESS])
            .with_register(icm42670::ADDRESS, 0x75, &[0x12]);
        let mut sensors = Sensors::new(bus);
        let report = block_on(sensors.init());

        assert!(matches!(
            report.imu,
            Err(Error::Sensor(SensorError::UnexpectedId(0x12)))
        ));
        assert!(report.light.is_ok());
    }

    #[test]
    fn missing_light_sensor_fails_only_light() {
        let bus = FakeBus::new(&[icm42670::ADDRESS])
            .with_register(icm42670::ADDRESS, 0x75, &[0x67]);
        let mut sensors = Sensors::new(bus);
        let report = block_on(sensors.init());

        assert!(report.imu.is_ok());
        assert!(report.light.is_err());
        // The light sensor can be configured later, once it answers.
        sensors.i2c.present.push(veml6030::ADDRESS);
        assert!(block_on(sensors.init_light()).is_ok());
    }

    #[test]
    fn lux_reading_is_scaled() {
        let bus = FakeBus::new(&[veml6030::ADDRESS]).with_register(
            veml6030::ADDRESS,
            0x04,
            &1000u16.to_le_bytes(),
        );
        let mut sensors = Sensors::new(bus);
        let lux = block_on(sensors.read_lux()).unwrap();
        assert!((lux - 230.4).abs() < 1e-3);
    }

    #[test]
    fn level_board_reads_zero_pitch() {
        // 1 g on Z at ±4 g full scale.
        let mut burst = [0u8; 14];
        burst[6..8].copy_from_slice(&8192i16.to_be_bytes());
        let bus = FakeBus::new(&[icm42670::ADDRESS]).with_register(
            icm42670::ADDRESS,
            0x09,
            &burst,
        );
        let mut sensors = Sensors::new(bus);
        let sample = block_on(sensors.read_motion()).unwrap();
        assert!((sample.accel[2] - 1.0).abs() < 1e-6);
        assert!(sample.pitch_degrees().abs() < 1e-3);
    }
}
