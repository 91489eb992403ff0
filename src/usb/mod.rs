//! USB Device subsystem - presents a CDC-ACM serial port to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. A host-side peer reads sent messages from the port and
//! writes received ones to it, one line per message.

pub mod serial;
