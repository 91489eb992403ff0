//! Lux receive session.
//!
//! Runs while the sensor mode is [`SensorMode::Lux`]: light sensor
//! setup, one calibration reading, then `LUX_SAMPLES_PER_UNIT` samples per
//! time unit fed into a [`PulseDecoder`] that appends to the shared
//! message buffer.

use crate::config::{LUX_SAMPLES_PER_UNIT, POPUP_SENT_MS};
use crate::controller::SharedSignal;
use crate::error::Error;
use crate::light::decoder::PulseDecoder;
use crate::morse::timing::TimeUnit;
use crate::sensors::mode::SensorMode;
use crate::sensors::{veml6030, SensorBus, SensorControl};
use crate::ui;
use defmt::{info, warn};
use embassy_time::{Duration, Instant, Timer};
use embedded_hal_async::i2c::I2c;

/// Receive until the controller leaves Lux mode.
pub async fn receive<I2C: I2c>(
    bus: &SensorBus<I2C>,
    control: &SensorControl,
    message: &SharedSignal,
    unit: TimeUnit,
) {
    let mut decoder = match calibrate(bus, unit).await {
        Ok(decoder) => decoder,
        Err(e) => {
            warn!("Light calibration failed: {}", e);
            control.abort(SensorMode::Lux);
            ui::popup("Light sensor error", POPUP_SENT_MS);
            return;
        }
    };
    info!(
        "Light receiver calibrated: baseline {} lux, on above {}",
        decoder.baseline(),
        decoder.on_threshold()
    );

    let period = Duration::from_millis((unit.as_millis() / LUX_SAMPLES_PER_UNIT).max(1));

    while control.mode() == SensorMode::Lux {
        let reading = bus.lock().await.read_lux().await;
        match reading {
            Ok(lux) => {
                let now = Instant::now().as_millis();
                let updated = message.lock(|m| {
                    let mut signal = m.borrow_mut();
                    if decoder.sample(now, lux, &mut signal) {
                        Some(signal.clone())
                    } else {
                        None
                    }
                });
                if let Some(signal) = updated {
                    ui::show_signal(&signal);
                }
            }
            // Skip the sample; the decoder keeps its state.
            Err(e) => warn!("Lux read failed: {}", e),
        }
        Timer::after(period).await;
    }

    info!("Light receiver stopped");
}

/// Configure the light sensor and take the baseline once a full
/// integration period has passed.
async fn calibrate<I2C: I2c>(bus: &SensorBus<I2C>, unit: TimeUnit) -> Result<PulseDecoder, Error> {
    bus.lock().await.init_light().await?;
    Timer::after_millis(veml6030::SETTLE_MS).await;
    let lux = bus.lock().await.read_lux().await?;
    Ok(PulseDecoder::calibrate(lux, unit))
}
