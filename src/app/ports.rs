//! Port traits: the hexagonal boundary between domain logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, buttons, screen, indicators, serial link,
//! event sinks) implement these traits. The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches hardware directly.

use crate::drivers::led_patterns::Rgb;
use crate::error::{CommsError, SensorError};
use crate::melody::Note;
use crate::screen::ScreenFrame;
use crate::sensors::Acceleration;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the three environment sensors plus the light
/// sensor's interrupt window.
pub trait SensorPort {
    /// Temperature in tenths of a degree Celsius.
    fn read_temperature(&mut self) -> Result<i32, SensorError>;

    /// Ambient light in lux.
    fn read_light(&mut self) -> Result<u32, SensorError>;

    fn read_acceleration(&mut self) -> Result<Acceleration, SensorError>;

    /// Move the "too dark" interrupt threshold. `0` effectively disarms it.
    fn set_light_low_threshold(&mut self, lux: u32);

    /// Clear the sensor's latched interrupt flag.
    fn acknowledge_light_interrupt(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: buttons → domain)
// ───────────────────────────────────────────────────────────────

/// Raw (undebounced) button levels, `true` while held.
pub trait InputPort {
    fn mode_button_pressed(&mut self) -> bool;
    fn guess_button_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → OLED / 7-segment)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Replace everything on the OLED with `frame`.
    fn show_screen(&mut self, frame: &ScreenFrame) -> Result<(), CommsError>;

    /// Show one glyph on the 7-segment digit, or blank it.
    fn set_seven_segment(&mut self, glyph: Option<char>);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → LEDs / speaker)
// ───────────────────────────────────────────────────────────────

pub trait IndicatorPort {
    fn set_rgb(&mut self, colour: Rgb);

    /// Bit n lights LED n of the 16-LED bar.
    fn set_led_bar(&mut self, pattern: u16);

    /// Sound `note` until told otherwise; `None` silences the speaker.
    fn set_tone(&mut self, note: Option<Note>);
}

// ───────────────────────────────────────────────────────────────
// Serial port (driven adapter: domain → UART)
// ───────────────────────────────────────────────────────────────

pub trait SerialPort {
    fn send(&mut self, bytes: &[u8]) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Everything the service needs from the board, in one bound.
pub trait Board: SensorPort + InputPort + DisplayPort + IndicatorPort + SerialPort {}

impl<T> Board for T where T: SensorPort + InputPort + DisplayPort + IndicatorPort + SerialPort {}
