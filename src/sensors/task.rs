//! Sensor task - executes the mode selected by the controller.

use crate::controller::SharedSignal;
use crate::light::receiver;
use crate::morse::timing::TimeUnit;
use crate::sensors::mode::SensorMode;
use crate::sensors::{SensorBus, SensorControl};
use defmt::{debug, info, warn};
use embedded_hal_async::i2c::I2c;

/// Idle until woken, take one orientation sample in Angle mode, run the
/// light receiver for as long as Lux mode lasts.
pub async fn sensor_task<I2C: I2c>(
    bus: &SensorBus<I2C>,
    control: &SensorControl,
    message: &SharedSignal,
    unit: TimeUnit,
) -> ! {
    info!("Sensor task started");

    loop {
        match control.mode() {
            SensorMode::Idle => control.wait_for_request().await,
            SensorMode::Angle => {
                let reading = bus.lock().await.read_motion().await;
                match reading {
                    Ok(sample) => {
                        let pitch = sample.pitch_degrees();
                        debug!("Pitch {} deg", pitch);
                        control.publish_pitch(pitch);
                    }
                    Err(e) => warn!("IMU read failed: {}", e),
                }
                control.finish(SensorMode::Angle);
            }
            SensorMode::Lux => receiver::receive(bus, control, message, unit).await,
        }
    }
}
