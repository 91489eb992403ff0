//! Unified error type for lightmorse.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging when the
//! `defmt` feature is on.
//!
//! Codec-level conditions (unknown tokens, bounced edges, full buffers)
//! are not errors; they are handled in place and never reach this type.

/// Top-level error type used across the application.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Sensors
    /// An I²C transaction with a sensor failed.
    Sensor(SensorError),

    // USB
    /// The host closed or reset the serial endpoint.
    UsbDisconnected,
}

/// Which sensor operation failed.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus-level failure (NACK, arbitration, DMA).
    Bus,
    /// WHO_AM_I did not match the expected part.
    UnexpectedId(u8),
}

// Convenience conversions

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Error::Sensor(e)
    }
}

#[cfg(feature = "embedded")]
impl From<embassy_usb::driver::EndpointError> for Error {
    fn from(_: embassy_usb::driver::EndpointError) -> Self {
        Error::UsbDisconnected
    }
}
