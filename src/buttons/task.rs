//! GPIO button tasks.
//!
//! Each button task runs two futures side by side:
//!
//! - the **edge watcher** sees every GPIO edge. Press edges are dropped
//!   while the button's [`EdgeGate`] is closed and debounced otherwise.
//! - the **classifier** closes the gate while it times an accepted press,
//!   publishes the event and reopens the gate once the button is up.
//!
//! A separate health task reopens gates that stay closed, so a lost
//! release edge cannot lock a button out.

use crate::buttons::classifier::{ButtonId, ButtonState};
use crate::buttons::mailbox::{EdgeGate, EventMailbox};
use crate::config::{BUTTON_HEALTH_INTERVAL_SECS, BUTTON_POLL_MS};
use core::cell::{Cell, RefCell};
use defmt::{debug, info};
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};

type Wake = Signal<NoopRawMutex, ()>;

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Run a single button.
pub async fn button_task(
    pin: AnyPin,
    id: ButtonId,
    gate: &EdgeGate,
    mailbox: &EventMailbox,
    ready: &Signal<CriticalSectionRawMutex, ()>,
) -> ! {
    let mut btn = Input::new(pin, Pull::Up);
    let state = RefCell::new(ButtonState::new(id));
    let held = Cell::new(btn.is_low());
    let pressed = Wake::new();
    let released = Wake::new();

    let watcher = watch_edges(&mut btn, &state, gate, &held, &pressed, &released);
    let classifier = classify_presses(&state, gate, &held, &pressed, &released, mailbox, ready);
    match select(watcher, classifier).await {
        Either::First(never) | Either::Second(never) => never,
    }
}

async fn watch_edges(
    btn: &mut Input<'_>,
    state: &RefCell<ButtonState>,
    gate: &EdgeGate,
    held: &Cell<bool>,
    pressed: &Wake,
    released: &Wake,
) -> ! {
    loop {
        btn.wait_for_any_edge().await;
        let low = btn.is_low();
        held.set(low);

        if !low {
            released.signal(());
        } else if state.borrow_mut().gated_press_edge(gate, now_ms()) {
            pressed.signal(());
        } else {
            debug!("Button {}: edge dropped", state.borrow().id());
        }
    }
}

async fn classify_presses(
    state: &RefCell<ButtonState>,
    gate: &EdgeGate,
    held: &Cell<bool>,
    pressed: &Wake,
    released: &Wake,
    mailbox: &EventMailbox,
    ready: &Signal<CriticalSectionRawMutex, ()>,
) -> ! {
    loop {
        pressed.wait().await;
        gate.disable();
        released.reset();

        // Time the press.
        let event = loop {
            Timer::after(Duration::from_millis(BUTTON_POLL_MS)).await;
            if let Some(event) = state.borrow_mut().poll(now_ms(), held.get()) {
                break event;
            }
        };

        info!("Button: {}", event);
        let replaced = mailbox.publish(event);
        if !replaced.is_none() {
            debug!("Button: {} overwrote unconsumed {}", event, replaced);
        }
        ready.signal(());

        while held.get() {
            released.wait().await;
        }
        state.borrow_mut().release_edge(now_ms());
        gate.enable();
    }
}

/// Periodically reopen every button's edge gate.
pub async fn gate_health_task(gates: &[EdgeGate]) -> ! {
    loop {
        Timer::after(Duration::from_secs(BUTTON_HEALTH_INTERVAL_SECS)).await;
        for (idx, gate) in gates.iter().enumerate() {
            if gate.force_enable() {
                debug!("Button gate {} was closed, re-enabled", idx);
            }
        }
    }
}
