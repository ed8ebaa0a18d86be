//! System configuration parameters
//!
//! All tunable thresholds and cadences for the HomeWatch base board.
//! Values are compile-time defaults; `validate()` runs once at boot.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Alerts ---
    /// Temperature above which the fire flag latches (tenths of °C).
    pub temperature_alarm_tenths: i32,
    /// Light-sensor low threshold that raises the darkness interrupt (lux).
    pub light_low_threshold_lux: u32,
    /// Light-sensor high threshold programmed at boot (lux).
    pub light_high_threshold_lux: u32,
    /// Acceleration-magnitude drop that counts as movement.
    pub motion_delta_threshold: u32,
    /// Half-period of the alert blink (on time == off time).
    pub blink_half_period_ms: u32,

    // --- Timing ---
    /// Mode button debounce window (milliseconds).
    pub mode_button_debounce_ms: u32,
    /// Length of one reporter step / one game second (milliseconds).
    pub cycle_tick_ms: u32,
    /// Steps per report cycle; the report goes out on the last step.
    pub report_cycle_steps: u8,
    /// Steps at which the sensor snapshot is refreshed.
    pub sample_steps: [u8; 3],

    // --- Game ---
    /// A round ends once the LED-bar pattern exceeds this value.
    pub game_bar_limit: u32,
    /// Best score before any game has been won (lower is better).
    pub initial_best_score: u32,
    /// Seed for the target-digit generator. Must be non-zero.
    pub game_seed: u32,

    // --- Comms / housekeeping ---
    /// Serial link baud rate.
    pub uart_baud: u32,
    /// Task watchdog timeout (seconds).
    pub watchdog_timeout_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Alerts
            temperature_alarm_tenths: 450, // 45.0 °C
            light_low_threshold_lux: 50,
            light_high_threshold_lux: 972,
            motion_delta_threshold: 7,
            blink_half_period_ms: 333,

            // Timing
            mode_button_debounce_ms: 500,
            cycle_tick_ms: 1000,
            report_cycle_steps: 16,
            sample_steps: [6, 11, 16],

            // Game
            game_bar_limit: 65_535,
            initial_best_score: 1000,
            game_seed: 0x2545_F491,

            // Comms
            uart_baud: 115_200,
            watchdog_timeout_secs: 5,
        }
    }
}

impl SystemConfig {
    /// Reject combinations the control loop cannot run with.
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        use crate::error::Error;

        if self.light_low_threshold_lux >= self.light_high_threshold_lux {
            return Err(Error::Config("light low threshold must be below high threshold"));
        }
        if self.cycle_tick_ms == 0 || self.mode_button_debounce_ms == 0 {
            return Err(Error::Config("timing intervals must be non-zero"));
        }
        if self.blink_half_period_ms == 0 {
            return Err(Error::Config("blink half-period must be non-zero"));
        }
        // Step display is a single hex glyph.
        if self.report_cycle_steps == 0 || self.report_cycle_steps > 16 {
            return Err(Error::Config("report cycle must be 1..=16 steps"));
        }
        if self
            .sample_steps
            .iter()
            .any(|&s| s == 0 || s > self.report_cycle_steps)
        {
            return Err(Error::Config("sample step outside report cycle"));
        }
        if self.game_seed == 0 {
            return Err(Error::Config("game seed must be non-zero"));
        }
        Ok(())
    }
}
