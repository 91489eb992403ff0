//! User interface subsystem - OLED display.
//!
//! Other tasks never touch the display driver. They update the current
//! [`Screen`] or post a timed popup here, and the display task renders.
//!
//! ## Components
//!
//! - **Screen**: pure content model (header, three lines, footer)
//! - **Display**: SSD1306 128×64 OLED via I²C and the render task

pub mod display;
pub mod screen;

use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use screen::Screen;

/// Overlay shown for a fixed time before the current screen returns.
pub struct Popup {
    pub screen: Screen,
    pub duration_ms: u64,
}

static CURRENT: Mutex<CriticalSectionRawMutex, RefCell<Screen>> =
    Mutex::new(RefCell::new(Screen::empty()));
static REDRAW: Signal<CriticalSectionRawMutex, ()> = Signal::new();
static POPUP: Signal<CriticalSectionRawMutex, Popup> = Signal::new();

/// Replace the current screen.
pub fn show(screen: Screen) {
    CURRENT.lock(|c| *c.borrow_mut() = screen);
    REDRAW.signal(());
}

/// Refresh the message lines of the current screen.
pub fn show_signal(signal: &str) {
    CURRENT.lock(|c| c.borrow_mut().set_signal(signal));
    REDRAW.signal(());
}

pub fn popup(text: &str, duration_ms: u64) {
    popup_screen(Screen::popup(text), duration_ms);
}

pub fn popup_screen(screen: Screen, duration_ms: u64) {
    POPUP.signal(Popup {
        screen,
        duration_ms,
    });
}

fn current() -> Screen {
    CURRENT.lock(|c| c.borrow().clone())
}
