//! 128×64 SSD1306 OLED on I2C1.
//!
//! Frames are rendered with `embedded-graphics` in the 6×10 ASCII font,
//! top-left anchored at the pixel positions the [`ScreenFrame`] carries,
//! then pushed to the panel in one flush.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: [`Oled`] owns an `ssd1306` buffered-graphics display.
//! On host/test: [`TextBuffer`] keeps the last frame in memory.

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

use crate::error::CommsError;
use crate::screen::ScreenFrame;

/// Something a whole [`ScreenFrame`] can be shown on.
pub trait FramePanel {
    fn show(&mut self, frame: &ScreenFrame) -> Result<(), CommsError>;
}

const TEXT_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

/// Draw every line of `frame` onto `target`. The caller clears first.
pub fn draw_frame<D>(target: &mut D, frame: &ScreenFrame) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for line in frame.lines() {
        let origin = Point::new(i32::from(line.x), i32::from(line.y));
        Text::with_baseline(&line.text, origin, TEXT_STYLE, Baseline::Top).draw(target)?;
    }
    Ok(())
}

// ── ESP-IDF panel ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use panel::Oled;

#[cfg(target_os = "espidf")]
mod panel {
    use embedded_hal::i2c::I2c;
    use log::info;
    use ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*};

    use super::{FramePanel, draw_frame};
    use crate::error::CommsError;
    use crate::screen::ScreenFrame;

    type Display<I> = Ssd1306<I2CInterface<I>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

    pub struct Oled<I: I2c> {
        display: Display<I>,
    }

    impl<I: I2c> Oled<I> {
        pub fn new(i2c: I) -> Result<Self, CommsError> {
            let interface = I2CDisplayInterface::new(i2c);
            let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
                .into_buffered_graphics_mode();
            display.init().map_err(|_| CommsError::BusWriteFailed)?;
            display.clear_buffer();
            display.flush().map_err(|_| CommsError::BusWriteFailed)?;
            info!("OLED: SSD1306 128x64 ready");
            Ok(Self { display })
        }
    }

    impl<I: I2c> FramePanel for Oled<I> {
        fn show(&mut self, frame: &ScreenFrame) -> Result<(), CommsError> {
            self.display.clear_buffer();
            draw_frame(&mut self.display, frame).map_err(|_| CommsError::BusWriteFailed)?;
            self.display.flush().map_err(|_| CommsError::BusWriteFailed)
        }
    }
}

// ── In-memory panel ───────────────────────────────────────────

#[derive(Debug, Default)]
pub struct TextBuffer {
    frame: ScreenFrame,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> &ScreenFrame {
        &self.frame
    }
}

impl FramePanel for TextBuffer {
    fn show(&mut self, frame: &ScreenFrame) -> Result<(), CommsError> {
        self.frame = frame.clone();
        Ok(())
    }
}
