//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, thresholds, buffer sizes and USB identity
//! live here so they can be tuned in one place.

// Morse timing

/// Base time unit of the light protocol (ms).
///
/// Every other protocol duration (dot, dash, gaps) is derived from this
/// value through [`crate::morse::timing::TimeUnit`]. Senders are expected to
/// use ~250 ms; receiving with 200 ms absorbs jitter from the lux sensor.
/// Anything faster is not compatible with the VEML6030 integration time.
pub const TIME_UNIT_MS: u64 = 200;

/// Capacity of a SignalString and of translated text (bytes).
pub const SIGNAL_CAPACITY: usize = 256;

// Light receiver

/// Lux above the calibration baseline that counts as "light on".
pub const LUX_ON_MARGIN: f32 = 20.0;

/// Number of light samples taken per time unit.
pub const LUX_SAMPLES_PER_UNIT: u64 = 3;

// Angle composer

/// Pitch magnitude (degrees) above which a tilt is read as a dot.
pub const PITCH_DOT_THRESHOLD_DEG: f32 = 45.0;

/// How long the controller waits for a fresh pitch reading (ms).
pub const PITCH_READ_TIMEOUT_MS: u64 = 300;

// Buttons
//
//   Button 1 → P0.11
//   Button 2 → P0.12
//   Red LED  → P0.13 (active-low)
//   Display I²C SDA/SCL → P0.26 / P0.27 (TWISPI0)
//   Sensor  I²C SDA/SCL → P0.30 / P0.31 (TWISPI1)

/// Edges closer than this to the previous accepted edge are dropped (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 100;

/// Hold time at which a press becomes a long press (ms).
pub const BUTTON_LONG_PRESS_MS: u64 = 1000;

/// Poll interval of the classification phase (ms).
pub const BUTTON_POLL_MS: u64 = 200;

/// Interval of the health task that force-re-enables button edges (s).
pub const BUTTON_HEALTH_INTERVAL_SECS: u64 = 5;

// Display

/// Number of content lines between header and footer.
pub const DISPLAY_LINES: usize = 3;

/// Capacity of a single display line (bytes).
pub const DISPLAY_LINE_CAPACITY: usize = 64;

/// Characters that fit on one row (128 px / 6 px font).
pub const DISPLAY_COLUMNS: usize = 21;

/// Popup shown after a message is sent (ms).
pub const POPUP_SENT_MS: u64 = 2000;

/// Popup shown when a message arrives (ms).
pub const POPUP_RECEIVED_MS: u64 = 3000;

// USB serial transport

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "lightmorse";
pub const USB_PRODUCT: &str = "Light Morse Messenger";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// CDC-ACM bulk endpoint packet size.
pub const USB_PACKET_SIZE: u16 = 64;

/// Depth of the inbound and outbound message queues.
pub const MESSAGE_QUEUE_DEPTH: usize = 4;
