//! Light channel: LED blinker out, lux-sampling receiver in.

pub mod blinker;
pub mod decoder;
pub mod encoder;
pub mod receiver;
