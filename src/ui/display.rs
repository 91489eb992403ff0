//! SSD1306 OLED display wrapper and render task.

use crate::config::DISPLAY_LINES;
use crate::ui::screen::Screen;
use crate::ui::{current, POPUP, REDRAW};
use defmt::info;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

const HEADER_Y: i32 = 8;
const FIRST_LINE_Y: i32 = 22;
const LINE_PITCH: i32 = 12;
const FOOTER_Y: i32 = 62;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style() -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Render header, content lines and footer.
pub fn draw_screen<I2C>(display: &mut Display<I2C>, screen: &Screen)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let _ = Text::new(&screen.header, Point::new(0, HEADER_Y), text_style()).draw(display);

    for (row, line) in screen.lines.iter().take(DISPLAY_LINES).enumerate() {
        let y = FIRST_LINE_Y + row as i32 * LINE_PITCH;
        let _ = Text::new(line, Point::new(0, y), text_style()).draw(display);
    }

    let _ = Text::new(&screen.footer, Point::new(0, FOOTER_Y), text_style()).draw(display);

    let _ = display.flush();
}

/// Redraw on every screen change. A popup stays up for its duration,
/// then whatever screen is current at that point comes back.
pub async fn display_task<I2C>(mut display: Display<I2C>) -> !
where
    I2C: embedded_hal::i2c::I2c,
{
    info!("Display task started");
    draw_screen(&mut display, &current());

    loop {
        match select(REDRAW.wait(), POPUP.wait()).await {
            Either::First(()) => draw_screen(&mut display, &current()),
            Either::Second(popup) => {
                draw_screen(&mut display, &popup.screen);
                Timer::after(Duration::from_millis(popup.duration_ms)).await;
                draw_screen(&mut display, &current());
            }
        }
    }
}
