//! Message transport between the device and the host.
//!
//! Outgoing messages are queued by the controller and written by the USB
//! serial task. Incoming lines are queued by the USB serial task and
//! announced here: received-message popup plus LED playback.

pub mod line;

use crate::config::{MESSAGE_QUEUE_DEPTH, POPUP_RECEIVED_MS, SIGNAL_CAPACITY};
use crate::light::blinker::request_blink;
use crate::morse::push_truncating;
use crate::ui;
use crate::ui::screen::Screen;
use defmt::info;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

/// One message on the wire: a signal string without line terminator.
pub type Message = String<SIGNAL_CAPACITY>;

static INBOX: Channel<CriticalSectionRawMutex, Message, MESSAGE_QUEUE_DEPTH> = Channel::new();
static OUTBOX: Channel<CriticalSectionRawMutex, Message, MESSAGE_QUEUE_DEPTH> = Channel::new();

/// Queue `text` for the host. Returns `false` if the outbound queue is
/// full (no host reading the port) and the message was dropped.
pub fn send(text: &str) -> bool {
    let mut msg = Message::new();
    push_truncating(&mut msg, text);
    OUTBOX.try_send(msg).is_ok()
}

pub async fn receive() -> Message {
    INBOX.receive().await
}

/// Hand a line read from the host to the messenger.
pub async fn deliver(msg: Message) {
    INBOX.send(msg).await;
}

pub async fn next_outgoing() -> Message {
    OUTBOX.receive().await
}

pub async fn messenger_task() -> ! {
    info!("Messenger task started");
    loop {
        let msg = receive().await;
        info!("Received: {}", msg.as_str());
        ui::popup_screen(Screen::received(&msg), POPUP_RECEIVED_MS);
        request_blink(&msg);
    }
}
