//! USB CDC-ACM serial device - the message link to the host.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral with a single CDC-ACM interface. Messages travel as
//! newline-terminated ASCII lines in both directions.

use crate::config::{self, SIGNAL_CAPACITY, USB_PACKET_SIZE};
use crate::error::Error;
use crate::messenger::{self, line::LineAssembler, Message};
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_usb::class::cdc_acm::{CdcAcmClass, Receiver, Sender, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;
pub type SerialTx = Sender<'static, UsbDriver>;
pub type SerialRx = Receiver<'static, UsbDriver>;

static SERIAL_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Build result containing the USB device runner and both serial halves.
pub struct UsbSerial {
    pub device: UsbDevice<'static, UsbDriver>,
    pub tx: SerialTx,
    pub rx: SerialRx,
}

/// Initialise the USB stack and create the serial interface.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbSerial {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let state = SERIAL_STATE.init(State::new());
    let class = CdcAcmClass::new(&mut builder, state, USB_PACKET_SIZE);
    let (tx, rx) = class.split();

    let device = builder.build();

    info!("USB CDC-ACM serial device initialised");

    UsbSerial { device, tx, rx }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

async fn forward_lines(
    rx: &mut SerialRx,
    assembler: &mut LineAssembler<SIGNAL_CAPACITY>,
) -> Result<(), Error> {
    let mut buf = [0u8; USB_PACKET_SIZE as usize];
    loop {
        let n = rx.read_packet(&mut buf).await?;
        for &byte in &buf[..n] {
            if let Some(line) = assembler.push(byte) {
                messenger::deliver(line).await;
            }
        }
    }
}

/// Host → device: assemble lines and hand them to the messenger.
pub async fn serial_rx_task(mut rx: SerialRx) -> ! {
    let mut assembler = LineAssembler::<SIGNAL_CAPACITY>::new();
    loop {
        rx.wait_connection().await;
        info!("USB serial connected");
        if let Err(e) = forward_lines(&mut rx, &mut assembler).await {
            warn!("USB serial read stopped: {}", e);
        }
        assembler.clear();
    }
}

async fn write_line(tx: &mut SerialTx, msg: &Message) -> Result<(), Error> {
    for chunk in msg.as_bytes().chunks(USB_PACKET_SIZE as usize) {
        tx.write_packet(chunk).await?;
    }
    tx.write_packet(b"\n").await?;
    Ok(())
}

/// Device → host: write each queued message as one line.
pub async fn serial_tx_task(mut tx: SerialTx) -> ! {
    info!("USB serial writer started");
    loop {
        let msg = messenger::next_outgoing().await;
        if let Err(e) = write_line(&mut tx, &msg).await {
            warn!("Dropped outgoing message: {}", e);
        }
    }
}
