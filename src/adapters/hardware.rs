//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the sensor bus, the OLED panel and every output driver, exposing
//! them through the [`Board`](crate::app::ports::Board) ports. This is
//! the only module in the system that touches actual hardware. On
//! non-espidf targets the underlying drivers use cfg-gated simulation
//! stubs.

use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::{DisplayPort, IndicatorPort, InputPort, SensorPort, SerialPort};
use crate::drivers::button;
use crate::drivers::led_bar::Pca9532;
use crate::drivers::led_patterns::Rgb;
use crate::drivers::oled::FramePanel;
use crate::drivers::seven_seg::SevenSegment;
use crate::drivers::speaker::Speaker;
use crate::drivers::status_led::StatusLed;
use crate::drivers::uart::SerialLink;
use crate::error::{CommsError, SensorError};
use crate::melody::Note;
use crate::pins;
use crate::screen::ScreenFrame;
use crate::sensors::Acceleration;
use crate::sensors::accel::Mma7455;
use crate::sensors::light::Isl29003;
use crate::sensors::temperature::TemperatureSensor;

/// Concrete adapter that combines all hardware behind port traits.
///
/// `I` is the shared sensor / LED-bar I²C bus; `P` is the OLED panel.
pub struct BoardAdapter<I, P> {
    bus: I,
    panel: P,
    temperature: TemperatureSensor,
    light: Isl29003,
    accel: Mma7455,
    led_bar: Pca9532,
    seven_seg: SevenSegment,
    status_led: StatusLed,
    speaker: Speaker,
    serial: SerialLink,
}

impl<I: I2c, P: FramePanel> BoardAdapter<I, P> {
    pub fn new(bus: I, panel: P) -> Self {
        Self {
            bus,
            panel,
            temperature: TemperatureSensor::new(),
            light: Isl29003::new(),
            accel: Mma7455::new(),
            led_bar: Pca9532,
            seven_seg: SevenSegment::new(),
            status_led: StatusLed::new(),
            speaker: Speaker::new(),
            serial: SerialLink::new(),
        }
    }

    /// Bring up the I²C devices: light sensor with both alarm thresholds,
    /// accelerometer in measurement mode, LED bar cleared.
    pub fn init_devices(&mut self, low_lux: u32, high_lux: u32) -> Result<(), crate::error::Error> {
        self.light.init(&mut self.bus, low_lux, high_lux)?;
        self.accel.init(&mut self.bus)?;
        self.led_bar.clear(&mut self.bus)?;
        self.seven_seg.show(None);
        self.status_led.off();
        info!("Board devices ready (light alarm {}..{} lux)", low_lux, high_lux);
        Ok(())
    }

    #[cfg(test)]
    fn panel(&self) -> &P {
        &self.panel
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I: I2c, P> SensorPort for BoardAdapter<I, P> {
    fn read_temperature(&mut self) -> Result<i32, SensorError> {
        self.temperature.read_tenths()
    }

    fn read_light(&mut self) -> Result<u32, SensorError> {
        self.light.read_lux(&mut self.bus)
    }

    fn read_acceleration(&mut self) -> Result<Acceleration, SensorError> {
        self.accel.read(&mut self.bus)
    }

    fn set_light_low_threshold(&mut self, lux: u32) {
        if let Err(e) = self.light.set_low_threshold(&mut self.bus, lux) {
            warn!("light threshold write failed: {}", e);
        }
    }

    fn acknowledge_light_interrupt(&mut self) {
        if let Err(e) = self.light.clear_interrupt(&mut self.bus) {
            warn!("light interrupt clear failed: {}", e);
        }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<I, P> InputPort for BoardAdapter<I, P> {
    fn mode_button_pressed(&mut self) -> bool {
        button::is_pressed_hw(pins::MODE_BUTTON_GPIO)
    }

    fn guess_button_pressed(&mut self) -> bool {
        button::is_pressed_hw(pins::GUESS_BUTTON_GPIO)
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl<I, P: FramePanel> DisplayPort for BoardAdapter<I, P> {
    fn show_screen(&mut self, frame: &ScreenFrame) -> Result<(), CommsError> {
        self.panel.show(frame)
    }

    fn set_seven_segment(&mut self, glyph: Option<char>) {
        self.seven_seg.show(glyph);
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<I: I2c, P> IndicatorPort for BoardAdapter<I, P> {
    fn set_rgb(&mut self, colour: Rgb) {
        self.status_led.set_colour(colour);
    }

    fn set_led_bar(&mut self, pattern: u16) {
        if let Err(e) = self.led_bar.set_leds(&mut self.bus, pattern) {
            warn!("LED bar write failed: {}", e);
        }
    }

    fn set_tone(&mut self, note: Option<Note>) {
        self.speaker.set_tone(note);
    }
}

// ── SerialPort implementation ─────────────────────────────────

impl<I, P> SerialPort for BoardAdapter<I, P> {
    fn send(&mut self, bytes: &[u8]) -> Result<(), CommsError> {
        self.serial.send(bytes)
    }
}
