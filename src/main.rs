//! lightmorse - two-button Morse messenger for the nRF52840.
//!
//! Messages are composed by tilting the board (angle mode) or by reading
//! light pulses from another device (lux mode), sent to the host over USB
//! serial, and received messages are shown and blinked on the LED.
//!
//! Task layout:
//!
//! ```text
//!  button ×2 ──▶ mailbox ──▶ controller ──▶ sensor task ──▶ ICM-42670 / VEML6030
//!  gate health ─┘                │  ▲                         │
//!                                │  └──── pitch ──────────────┘
//!                                ├──▶ ui (screen / popup) ──▶ display task
//!                                └──▶ messenger outbox ──▶ usb tx
//!  usb rx ──▶ messenger inbox ──▶ messenger task ──▶ ui popup + blinker
//! ```

#![no_std]
#![no_main]

mod buttons;
mod config;
mod controller;
mod error;
mod light;
mod messenger;
mod morse;
mod sensors;
mod ui;
mod usb;

use buttons::classifier::ButtonId;
use buttons::mailbox::{EdgeGate, EventMailbox};
use controller::SharedSignal;
use core::cell::RefCell;
use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive, Pin};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use morse::timing::TimeUnit;
use morse::SignalString;
use sensors::{SensorBus, SensorControl, Sensors};
use static_cell::StaticCell;
use ui::display::Display;
use usb::serial::{SerialRx, SerialTx, UsbDriver};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPIM1_SPIS1_TWIM1_TWIS1_SPI1_TWI1 => twim::InterruptHandler<peripherals::TWISPI1>;
});

type DisplayI2c = Twim<'static, peripherals::TWISPI0>;
type SensorI2c = Twim<'static, peripherals::TWISPI1>;

static BUTTON_EVENTS: EventMailbox = EventMailbox::new();
static BUTTON_GATES: [EdgeGate; 2] = [EdgeGate::new(), EdgeGate::new()];
static EVENT_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();
static SENSOR_CONTROL: SensorControl = SensorControl::new();
static MESSAGE: SharedSignal = BlockingMutex::new(RefCell::new(SignalString::new()));
static SENSOR_BUS: StaticCell<SensorBus<SensorI2c>> = StaticCell::new();

// ═══════════════════════════════════════════════════════════════════════════
// Tasks
// ═══════════════════════════════════════════════════════════════════════════

#[embassy_executor::task(pool_size = 2)]
async fn button_task(pin: AnyPin, id: ButtonId, gate: &'static EdgeGate) -> ! {
    buttons::task::button_task(pin, id, gate, &BUTTON_EVENTS, &EVENT_READY).await
}

#[embassy_executor::task]
async fn gate_health_task() -> ! {
    buttons::task::gate_health_task(&BUTTON_GATES).await
}

#[embassy_executor::task]
async fn controller_task() -> ! {
    controller::controller_task(&BUTTON_EVENTS, &EVENT_READY, &SENSOR_CONTROL, &MESSAGE).await
}

#[embassy_executor::task]
async fn sensor_task(bus: &'static SensorBus<SensorI2c>) -> ! {
    sensors::task::sensor_task(bus, &SENSOR_CONTROL, &MESSAGE, TimeUnit::default()).await
}

#[embassy_executor::task]
async fn blink_task(led: Output<'static>) -> ! {
    light::blinker::blink_task(led, TimeUnit::default()).await
}

#[embassy_executor::task]
async fn display_task(display: Display<DisplayI2c>) -> ! {
    ui::display::display_task(display).await
}

#[embassy_executor::task]
async fn messenger_task() -> ! {
    messenger::messenger_task().await
}

#[embassy_executor::task]
async fn usb_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    usb::serial::run_usb_device(device).await
}

#[embassy_executor::task]
async fn serial_rx_task(rx: SerialRx) -> ! {
    usb::serial::serial_rx_task(rx).await
}

#[embassy_executor::task]
async fn serial_tx_task(tx: SerialTx) -> ! {
    usb::serial::serial_tx_task(tx).await
}

// ═══════════════════════════════════════════════════════════════════════════
// Entry point
// ═══════════════════════════════════════════════════════════════════════════

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("lightmorse starting, time unit {} ms", config::TIME_UNIT_MS);

    let display_i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let display = ui::display::init(display_i2c);

    let sensor_i2c = Twim::new(p.TWISPI1, Irqs, p.P0_30, p.P0_31, twim::Config::default());
    let mut sensors = Sensors::new(sensor_i2c);
    // Keep running on failure: the composer and receiver report read errors,
    // and the light sensor is configured again per receive session.
    let report = sensors.init().await;
    match report.imu {
        Ok(()) => info!("ICM-42670 initialised"),
        Err(e) => warn!("ICM-42670 init failed: {}", e),
    }
    match report.light {
        Ok(()) => info!("VEML6030 initialised"),
        Err(e) => warn!("VEML6030 init failed: {}", e),
    }
    let bus = SENSOR_BUS.init(Mutex::new(sensors));

    // Active-low LED, start dark.
    let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);

    let usb = usb::serial::init(p.USBD);

    spawner.must_spawn(display_task(display));
    spawner.must_spawn(usb_task(usb.device));
    spawner.must_spawn(serial_rx_task(usb.rx));
    spawner.must_spawn(serial_tx_task(usb.tx));
    spawner.must_spawn(messenger_task());
    spawner.must_spawn(blink_task(led));
    spawner.must_spawn(sensor_task(bus));
    spawner.must_spawn(controller_task());
    spawner.must_spawn(button_task(p.P0_11.degrade(), ButtonId::One, &BUTTON_GATES[0]));
    spawner.must_spawn(button_task(p.P0_12.degrade(), ButtonId::Two, &BUTTON_GATES[1]));
    spawner.must_spawn(gate_health_task());

    info!("All tasks spawned");
}
