//! LED playback of received messages.

use crate::light::encoder::{blink_plan, plan_duration_ms, BlinkStep};
use crate::morse::timing::TimeUnit;
use crate::morse::{push_truncating, SignalString};
use defmt::info;
use embassy_nrf::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};

static BLINK_REQUEST: Signal<CriticalSectionRawMutex, SignalString> = Signal::new();

/// Queue `signal` for playback. A request made while another is waiting
/// replaces it.
pub fn request_blink(signal: &str) {
    let mut copy = SignalString::new();
    push_truncating(&mut copy, signal);
    BLINK_REQUEST.signal(copy);
}

/// Play `signal` on an active-low LED and leave it off.
pub async fn play(led: &mut Output<'_>, signal: &str, unit: TimeUnit) {
    for step in blink_plan(signal, unit) {
        match step {
            BlinkStep::On(_) => led.set_low(),
            BlinkStep::Off(_) => led.set_high(),
        }
        Timer::after(Duration::from_millis(step.duration_ms())).await;
    }
    led.set_high();
}

pub async fn blink_task(mut led: Output<'static>, unit: TimeUnit) -> ! {
    led.set_high();
    loop {
        let signal = BLINK_REQUEST.wait().await;
        info!(
            "Blinking: {} ({} ms)",
            signal.as_str(),
            plan_duration_ms(&signal, unit)
        );
        play(&mut led, &signal, unit).await;
    }
}
