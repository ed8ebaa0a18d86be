//! Periodic reporter for MONITOR mode.
//!
//! ```text
//!  second ─▶ ReportCycle::advance ─▶ step shown on 7-seg (0..F)
//!                                 │
//!                 step == 6, 11 ──┼──▶ re-sample sensors
//!                 step == 16 ─────┴──▶ alert messages + status line
//!                                      + ReportSequence::increment
//! ```
//!
//! Serial text is built in fixed-capacity `heapless::String`s.

use core::fmt::Write;

use heapless::String;

use crate::sensors::SensorSnapshot;

pub const FIRE_MESSAGE: &str = "Fire was Detected.\r\n";
pub const DARKNESS_MESSAGE: &str = "Movement in darkness was Detected.\r\n";
pub const MONITOR_ENTRY_MESSAGE: &str = "Entering MONITOR Mode.\r\n";

/// Longest line: "999_-_T-214748364.8_L4294967295_AX-128_AY-128_AZ-128\r\n"
pub const SERIAL_LINE_CAP: usize = 80;

/// One line of serial output.
pub type SerialLine = String<SERIAL_LINE_CAP>;

// ── Sequence counter ──────────────────────────────────────────

/// Three decimal digits, hundreds first. (9,9,9) wraps to (0,0,0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSequence {
    digits: [u8; 3],
}

impl ReportSequence {
    pub const fn new() -> Self {
        Self { digits: [0; 3] }
    }

    pub const fn from_digits(hundreds: u8, tens: u8, ones: u8) -> Self {
        Self { digits: [hundreds % 10, tens % 10, ones % 10] }
    }

    pub const fn digits(&self) -> [u8; 3] {
        self.digits
    }

    pub const fn value(&self) -> u16 {
        self.digits[0] as u16 * 100 + self.digits[1] as u16 * 10 + self.digits[2] as u16
    }

    /// Ones, carrying into tens, carrying into hundreds.
    pub fn increment(&mut self) {
        for digit in self.digits.iter_mut().rev() {
            if *digit < 9 {
                *digit += 1;
                return;
            }
            *digit = 0;
        }
    }
}

// ── Step cycle ────────────────────────────────────────────────

/// Position inside the 16-step (default) MONITOR cycle.
///
/// `step` is the value reached after the latest advance, so it runs
/// 1..=cycle_steps while counting and 0 right after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportCycle {
    step: u8,
    cycle_steps: u8,
}

impl ReportCycle {
    pub const fn new(cycle_steps: u8) -> Self {
        Self { step: 0, cycle_steps }
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// One second has elapsed. Returns the value to show on the display.
    pub fn advance(&mut self) -> u8 {
        if self.step >= self.cycle_steps {
            self.step = 0;
        }
        let shown = self.step;
        self.step += 1;
        shown
    }

    pub const fn step(&self) -> u8 {
        self.step
    }

    pub const fn is_report_step(&self) -> bool {
        self.step == self.cycle_steps
    }

    pub fn is_sample_step(&self, sample_steps: &[u8]) -> bool {
        sample_steps.contains(&self.step)
    }
}

// ── Formatting ────────────────────────────────────────────────

/// Write tenths as a signed decimal with one fractional digit.
pub fn write_tenths<W: Write>(out: &mut W, tenths: i32) -> core::fmt::Result {
    let sign = if tenths < 0 { "-" } else { "" };
    let abs = tenths.unsigned_abs();
    write!(out, "{}{}.{}", sign, abs / 10, abs % 10)
}

/// Tenths of a degree as `Display`, signed like the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenths(pub i32);

impl core::fmt::Display for Tenths {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write_tenths(f, self.0)
    }
}

/// `"<d0><d1><d2>_-_T<t.1>_L<lux>_AX<x>_AY<y>_AZ<z>\r\n"`
pub fn status_line(seq: &ReportSequence, snapshot: &SensorSnapshot) -> SerialLine {
    let mut line = SerialLine::new();
    let [h, t, o] = seq.digits();
    let a = snapshot.acceleration;
    // Capacity covers the widest possible values, so writes cannot fail.
    let _ = write!(line, "{}{}{}_-_T", h, t, o);
    let _ = write_tenths(&mut line, snapshot.temperature_tenths);
    let _ = write!(
        line,
        "_L{}_AX{}_AY{}_AZ{}\r\n",
        snapshot.light_lux, a.x, a.y, a.z
    );
    line
}

pub fn best_score_message(best: u32) -> SerialLine {
    let mut line = SerialLine::new();
    let _ = write!(line, "CONGRATULATIONS! Your Highest Score is now {}.\r\n", best);
    line
}

/// Copy a constant message into a serial line.
pub fn fixed_line(text: &str) -> SerialLine {
    let mut line = SerialLine::new();
    let _ = line.push_str(text);
    line
}
