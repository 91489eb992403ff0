//! Controller task - the only consumer of button events.
//!
//! Owns the [`menu::Menu`] state machine, performs the actions it
//! returns and keeps the display in step with the program state.

pub mod menu;

use crate::buttons::mailbox::EventMailbox;
use crate::config::{PITCH_READ_TIMEOUT_MS, POPUP_SENT_MS};
use crate::messenger;
use crate::morse::{push_symbol, push_truncating, SignalString, LETTER_GAP};
use crate::sensors::mode::SensorMode;
use crate::sensors::motion::symbol_for_pitch;
use crate::sensors::SensorControl;
use crate::ui;
use crate::ui::screen::Screen;
use core::cell::RefCell;
use defmt::{info, warn};
use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration};
use menu::{Action, Menu, ProgramState};

/// The message under composition, shared with the light receiver.
pub type SharedSignal = Mutex<CriticalSectionRawMutex, RefCell<SignalString>>;

pub async fn controller_task(
    mailbox: &EventMailbox,
    ready: &Signal<CriticalSectionRawMutex, ()>,
    control: &SensorControl,
    message: &SharedSignal,
) -> ! {
    let mut menu = Menu::new();
    refresh(&menu, message);
    info!("Controller started");

    loop {
        select(ready.wait(), control.wait_aborted()).await;
        // A receive session may have ended on its own.
        if menu.sync_receiving(control.mode() == SensorMode::Lux) {
            refresh(&menu, message);
        }
        let event = mailbox.take();
        if event.is_none() {
            continue;
        }

        info!("Controller: {} in {}/{}", event, menu.state(), menu.mode());
        for action in menu.handle(event) {
            perform(action, control, message).await;
        }
        refresh(&menu, message);
    }
}

async fn perform(action: Action, control: &SensorControl, message: &SharedSignal) {
    match action {
        Action::SampleAngle => {
            control.reset_pitch();
            control.request(SensorMode::Angle);
            let timeout = Duration::from_millis(PITCH_READ_TIMEOUT_MS);
            match with_timeout(timeout, control.wait_pitch()).await {
                Ok(pitch) => {
                    let symbol = symbol_for_pitch(pitch);
                    message.lock(|m| push_symbol(&mut *m.borrow_mut(), symbol));
                }
                Err(_) => warn!("No pitch reading within {} ms", PITCH_READ_TIMEOUT_MS),
            }
        }
        Action::AppendLetterGap => {
            message.lock(|m| push_truncating(&mut *m.borrow_mut(), LETTER_GAP));
        }
        Action::StartReceiving => control.request(SensorMode::Lux),
        Action::StopReceiving => control.request(SensorMode::Idle),
        Action::Clear => message.lock(|m| m.borrow_mut().clear()),
        Action::Send => {
            let outgoing = message.lock(|m| core::mem::take(&mut *m.borrow_mut()));
            if messenger::send(&outgoing) {
                info!("Sent: {}", outgoing.as_str());
                ui::popup("Message sent!", POPUP_SENT_MS);
            } else {
                warn!("Outbound queue full, dropped: {}", outgoing.as_str());
                ui::popup("Send failed", POPUP_SENT_MS);
            }
        }
        Action::Reboot => {
            info!("Rebooting");
            cortex_m::peripheral::SCB::sys_reset();
        }
    }
}

fn refresh(menu: &Menu, message: &SharedSignal) {
    let screen = match menu.state() {
        ProgramState::Menu => Screen::menu(menu.mode()),
        ProgramState::Compose => message.lock(|m| {
            Screen::compose(menu.mode(), menu.is_receiving(), m.borrow().as_str())
        }),
    };
    ui::show(screen);
}
