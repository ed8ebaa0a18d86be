//! Alert blink engine for the tri-colour LED.
//!
//! Turns an [`AlertSignal`] into a time-varying RGB value. The main loop
//! calls `tick()` every iteration and feeds the result to the RGB LED.
//!
//! ## Blink cycle
//!
//! ```text
//!   ┌──── on ────┐
//!   │  colour    │    off     │
//!   └────────────┴────────────┘
//!   0         half        2·half   → re-evaluate signal
//! ```
//!
//! A cycle runs to completion before the signal is re-read, unless a
//! higher-priority signal arrives, which restarts the cycle at once.
//!
//! | Signal            | Colour |
//! |-------------------|--------|
//! | `FireAndDarkness` | purple |
//! | `Fire`            | red    |
//! | `Darkness`        | blue   |

use crate::alerts::AlertSignal;
use crate::tick::TickSnapshot;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const COLOUR_OFF: Rgb = (0, 0, 0);
pub const COLOUR_FIRE: Rgb = (255, 0, 0); // Red
pub const COLOUR_DARKNESS: Rgb = (0, 0, 255); // Blue
pub const COLOUR_FIRE_AND_DARKNESS: Rgb = (255, 0, 255); // Purple

pub const fn signal_colour(signal: AlertSignal) -> Rgb {
    match signal {
        AlertSignal::None => COLOUR_OFF,
        AlertSignal::Darkness => COLOUR_DARKNESS,
        AlertSignal::Fire => COLOUR_FIRE,
        AlertSignal::FireAndDarkness => COLOUR_FIRE_AND_DARKNESS,
    }
}

#[derive(Debug, Clone, Copy)]
struct BlinkCycle {
    signal: AlertSignal,
    started: TickSnapshot,
}

/// Cooperative two-phase blinker. Stack-allocated, no heap.
#[derive(Debug)]
pub struct AlertBlinker {
    half_period_ms: u32,
    cycle: Option<BlinkCycle>,
}

impl AlertBlinker {
    pub const fn new(half_period_ms: u32) -> Self {
        Self { half_period_ms, cycle: None }
    }

    /// Advance the blink and return the current RGB output.
    pub fn tick(&mut self, signal: AlertSignal, now_ms: u32) -> Rgb {
        let restart = match self.cycle {
            Some(c) if signal > c.signal => true,
            Some(c) => c.started.has_elapsed(now_ms, 2 * self.half_period_ms),
            None => true,
        };
        if restart {
            self.cycle = signal
                .is_active()
                .then(|| BlinkCycle { signal, started: TickSnapshot::at(now_ms) });
        }

        match self.cycle {
            Some(c) if c.started.elapsed(now_ms) < self.half_period_ms => signal_colour(c.signal),
            _ => COLOUR_OFF,
        }
    }

    /// Drop any running cycle. The next `tick()` starts fresh.
    pub fn cancel(&mut self) {
        self.cycle = None;
    }

    #[cfg(test)]
    fn is_blinking(&self) -> bool {
        self.cycle.is_some()
    }
}
