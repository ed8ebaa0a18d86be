//! Tri-colour alert LED driver.
//!
//! Three GPIOs drive discrete R/G/B LEDs. A channel is lit when its
//! component is non-zero; there is no dimming.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the three GPIOs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::drivers::led_patterns::{COLOUR_OFF, Rgb};
use crate::pins;

pub struct StatusLed {
    current: Rgb,
}

impl StatusLed {
    pub fn new() -> Self {
        Self {
            current: COLOUR_OFF,
        }
    }

    /// Skips the GPIO writes when the colour is unchanged.
    pub fn set_colour(&mut self, colour: Rgb) {
        if colour == self.current {
            return;
        }
        let (r, g, b) = colour;
        hw_init::gpio_write(pins::LED_R_GPIO, r > 0);
        hw_init::gpio_write(pins::LED_G_GPIO, g > 0);
        hw_init::gpio_write(pins::LED_B_GPIO, b > 0);
        self.current = colour;
    }

    pub fn off(&mut self) {
        self.set_colour(COLOUR_OFF);
    }

    pub fn current_colour(&self) -> Rgb {
        self.current
    }
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}
