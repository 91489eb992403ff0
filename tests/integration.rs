//! Integration tests for lightmorse host-testable logic.

use lightmorse::buttons::classifier::{ButtonEvent, ButtonId, ButtonState};
use lightmorse::buttons::mailbox::EventMailbox;
use lightmorse::controller::menu::{Action, Menu, Mode, ProgramState};
use lightmorse::light::decoder::PulseDecoder;
use lightmorse::light::encoder::{blink_plan, BlinkStep};
use lightmorse::messenger::line::LineAssembler;
use lightmorse::morse::dictionary::encode_text;
use lightmorse::morse::timing::TimeUnit;
use lightmorse::morse::translator::decode;
use lightmorse::morse::{push_symbol, push_truncating, SignalString, LETTER_GAP};
use lightmorse::sensors::motion::{symbol_for_pitch, MotionSample};
use lightmorse::ui::screen::Screen;

/// Receiver sampling period at the default 200 ms unit.
const PERIOD: u64 = 200 / 3;

/// Light level over time for a blink schedule played from `t = 0`.
fn lux_at(steps: &[BlinkStep], now: u64) -> f32 {
    let mut t = 0;
    for step in steps {
        let end = t + step.duration_ms();
        if now < end {
            return match step {
                BlinkStep::On(_) => 250.0,
                BlinkStep::Off(_) => 8.0,
            };
        }
        t = end;
    }
    8.0
}

#[test]
fn blinked_message_is_received_by_a_slower_sampler() {
    // Sender at 250 ms, receiver at 200 ms sampling every unit / 3.
    let sender = TimeUnit::from_millis(250);
    let receiver = TimeUnit::from_millis(200);

    let sent = encode_text("sos");
    let steps: Vec<BlinkStep> = blink_plan(&sent, sender).collect();
    let total: u64 = steps.iter().map(|s| s.duration_ms()).sum();

    let mut decoder = PulseDecoder::calibrate(8.0, receiver);
    let mut signal = SignalString::new();
    let mut now = 17;
    while now < total + 600 {
        decoder.sample(now, lux_at(&steps, now), &mut signal);
        now += PERIOD;
    }

    assert_eq!(signal.trim_end(), "... --- ...");
    assert_eq!(decode(&signal).as_str(), "sos");
}

#[test]
fn host_line_is_announced_with_translation() {
    let mut lines = LineAssembler::<256>::new();
    let received: Vec<_> = b"-- --- .-. ... .\r\n"
        .iter()
        .filter_map(|&b| lines.push(b))
        .collect();
    assert_eq!(received.len(), 1);

    let screen = Screen::received(&received[0]);
    assert_eq!(screen.lines[1].as_str(), "-- --- .-. ... .");
    assert_eq!(screen.lines[2].as_str(), "morse");
}

#[test]
fn angle_composition_session() {
    let mailbox = EventMailbox::new();
    let mut menu = Menu::new();
    let mut message = SignalString::new();

    // Enter compose in angle mode.
    mailbox.publish(ButtonEvent::Button1Short);
    assert!(menu.handle(mailbox.take()).is_empty());
    assert_eq!(menu.state(), ProgramState::Compose);
    assert_eq!(menu.mode(), Mode::Angle);

    // Tilt steep, steep, flat: ". . -" with a letter gap before the dash.
    let pitches = [60.0, -70.0];
    for pitch in pitches {
        let actions = menu.handle(ButtonEvent::Button2Short);
        assert_eq!(actions.as_slice(), &[Action::SampleAngle]);
        push_symbol(&mut message, symbol_for_pitch(pitch));
    }
    assert_eq!(menu.handle(ButtonEvent::Button1Short).as_slice(), &[Action::AppendLetterGap]);
    push_truncating(&mut message, LETTER_GAP);

    let flat = MotionSample {
        accel: [0.0, 0.0, 1.0],
        ..MotionSample::default()
    };
    menu.handle(ButtonEvent::Button2Short);
    push_symbol(&mut message, symbol_for_pitch(flat.pitch_degrees()));

    assert_eq!(message.as_str(), ".. -");
    assert_eq!(decode(&message).as_str(), "it");

    assert_eq!(menu.handle(ButtonEvent::Button2Long).as_slice(), &[Action::Send]);
}

#[test]
fn long_press_then_release_reaches_menu_once() {
    let mailbox = EventMailbox::new();
    let mut button = ButtonState::new(ButtonId::One);
    let mut menu = Menu::new();
    menu.handle(ButtonEvent::Button1Short);

    assert!(button.press_edge(10_000));
    let mut now = 10_000;
    let event = loop {
        now += 200;
        if let Some(event) = button.poll(now, true) {
            break event;
        }
    };
    mailbox.publish(event);
    assert!(!button.release_edge(now + 300));

    let actions = menu.handle(mailbox.take());
    assert_eq!(actions.as_slice(), &[Action::Clear, Action::StopReceiving]);
    assert_eq!(menu.state(), ProgramState::Menu);
    assert!(mailbox.take().is_none());
}
