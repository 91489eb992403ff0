//! Test-only library interface for lightmorse.
//!
//! This module re-exports the pure logic modules that can be tested
//! on the host (no embedded hardware required).
//!
//! Usage: `cargo test --lib` and `cargo test --test integration`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod morse;

// Internal module paths for the actual implementations
#[path = "light/decoder.rs"]
mod light_decoder_impl;
#[path = "light/encoder.rs"]
mod light_encoder_impl;

#[path = "buttons/classifier.rs"]
mod buttons_classifier_impl;
#[path = "buttons/mailbox.rs"]
mod buttons_mailbox_impl;

#[path = "sensors/mode.rs"]
mod sensors_mode_impl;
#[path = "sensors/motion.rs"]
mod sensors_motion_impl;
#[path = "sensors/icm42670.rs"]
mod sensors_icm42670_impl;
#[path = "sensors/veml6030.rs"]
mod sensors_veml6030_impl;
#[path = "sensors/bus.rs"]
mod sensors_bus_impl;

#[path = "controller/menu.rs"]
mod controller_menu_impl;
#[path = "ui/screen.rs"]
mod ui_screen_impl;
#[path = "messenger/line.rs"]
mod messenger_line_impl;

pub mod light {
    pub mod decoder {
        pub use crate::light_decoder_impl::*;
    }
    pub mod encoder {
        pub use crate::light_encoder_impl::*;
    }
}

pub mod buttons {
    pub mod classifier {
        pub use crate::buttons_classifier_impl::*;
    }
    pub mod mailbox {
        pub use crate::buttons_mailbox_impl::*;
    }
}

pub mod sensors {
    pub mod mode {
        pub use crate::sensors_mode_impl::*;
    }
    pub mod motion {
        pub use crate::sensors_motion_impl::*;
    }
    pub mod icm42670 {
        pub use crate::sensors_icm42670_impl::*;
    }
    pub mod veml6030 {
        pub use crate::sensors_veml6030_impl::*;
    }
    pub mod bus {
        pub use crate::sensors_bus_impl::*;
    }
}

pub mod controller {
    pub mod menu {
        pub use crate::controller_menu_impl::*;
    }
}

pub mod ui {
    pub mod screen {
        pub use crate::ui_screen_impl::*;
    }
}

pub mod messenger {
    pub mod line {
        pub use crate::messenger_line_impl::*;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - cross-module properties
// ═══════════════════════════════════════════════════════════════════════════
