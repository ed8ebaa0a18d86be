//! Text-only screen frames for the 128×64 OLED.
//!
//! Handlers describe what the screen should show as a [`ScreenFrame`] (a
//! short list of strings at pixel positions). The service redraws the
//! panel only when the frame differs from the one last shown.
//!
//! ```text
//!  MONITOR                       GAME
//!  (30,0)  MONITOR               (30,0)  GAME
//!  (10,10) -------------         (10,10) -------------
//!  (0,20)  L = 120               (30,20) GUESS
//!  (0,30)  TEMP = 25.3           (30,30) THE
//!  (0,40)  X = -3  (50,40) Y = 1 (30,40) NUMBER!
//!  (30,50) Z = 64
//! ```

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::report::Tenths;
use crate::sensors::SensorSnapshot;

pub const MAX_LINES: usize = 8;
pub const LINE_CAP: usize = 24;

const SEPARATOR: &str = "-------------";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub x: u8,
    pub y: u8,
    pub text: String<LINE_CAP>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenFrame {
    lines: Vec<TextLine, MAX_LINES>,
}

impl ScreenFrame {
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Add a line. Text beyond the line capacity, or lines beyond
    /// `MAX_LINES`, are dropped.
    pub fn put(&mut self, x: u8, y: u8, text: &str) {
        self.put_fmt(x, y, format_args!("{}", text));
    }

    pub fn put_fmt(&mut self, x: u8, y: u8, args: fmt::Arguments<'_>) {
        let mut text = String::new();
        let _ = text.write_fmt(args);
        let _ = self.lines.push(TextLine { x, y, text });
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn is_blank(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text shown at `(x, y)`, if any.
    pub fn text_at(&self, x: u8, y: u8) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.x == x && l.y == y)
            .map(|l| l.text.as_str())
    }
}

// ── Frame builders ────────────────────────────────────────────

pub fn monitor_frame(snapshot: &SensorSnapshot) -> ScreenFrame {
    let mut f = ScreenFrame::new();
    let a = snapshot.acceleration;
    f.put(30, 0, "MONITOR");
    f.put(10, 10, SEPARATOR);
    f.put_fmt(0, 20, format_args!("L = {}", snapshot.light_lux));
    f.put_fmt(0, 30, format_args!("TEMP = {}", Tenths(snapshot.temperature_tenths)));
    f.put_fmt(0, 40, format_args!("X = {}", a.x));
    f.put_fmt(50, 40, format_args!("Y = {}", a.y));
    f.put_fmt(30, 50, format_args!("Z = {}", a.z));
    f
}

pub fn game_title_frame() -> ScreenFrame {
    let mut f = ScreenFrame::new();
    f.put(30, 0, "GAME");
    f.put(10, 10, SEPARATOR);
    f.put(30, 20, "GUESS");
    f.put(30, 30, "THE");
    f.put(30, 40, "NUMBER!");
    f
}

pub fn win_frame(score: u32) -> ScreenFrame {
    let mut f = ScreenFrame::new();
    f.put_fmt(10, 10, format_args!("Score: {}", score));
    f.put(10, 20, SEPARATOR);
    f.put(20, 50, "YOU WIN!");
    f
}
