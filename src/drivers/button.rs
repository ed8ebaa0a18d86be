//! Polled, time-window debounced push buttons.
//!
//! ## Hardware
//!
//! Active-low momentary switches with pull-ups. The main loop samples the
//! level once per iteration; the driver accepts a press only if the
//! previous accepted press is at least `window_ms` old. Holding the button
//! therefore repeats once per window, never faster. The boot tick counts
//! as a press, so the switch is ignored for one window after reset.
//!
//! | Button | Role                          | Debounce        |
//! |--------|-------------------------------|-----------------|
//! | SW4    | mode (STABLE ⇄ MONITOR, GAME → MONITOR) | 500 ms |
//! | SW3    | game guess                    | level, none     |

use crate::tick::TickSnapshot;

#[derive(Debug, Clone, Copy)]
pub struct DebouncedButton {
    window_ms: u32,
    last_accepted: Option<TickSnapshot>,
}

impl DebouncedButton {
    pub const fn new(window_ms: u32) -> Self {
        Self { window_ms, last_accepted: None }
    }

    /// Start the window at `now_ms` as if a press had just been accepted.
    pub fn arm(&mut self, now_ms: u32) {
        self.last_accepted = Some(TickSnapshot::at(now_ms));
    }

    /// Feed one level sample. Returns `true` if this sample counts as a press.
    pub fn sample(&mut self, pressed: bool, now_ms: u32) -> bool {
        if !pressed {
            return false;
        }
        let open = self
            .last_accepted
            .is_none_or(|t| t.has_elapsed(now_ms, self.window_ms));
        if open {
            self.last_accepted = Some(TickSnapshot::at(now_ms));
        }
        open
    }
}

/// Read an active-low button pin.
#[cfg(target_os = "espidf")]
pub fn is_pressed_hw(gpio: i32) -> bool {
    !crate::drivers::hw_init::gpio_read(gpio)
}

#[cfg(not(target_os = "espidf"))]
pub fn is_pressed_hw(_gpio: i32) -> bool {
    false
}
