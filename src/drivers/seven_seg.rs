//! Single-digit 7-segment display behind a 74HC595 shift register.
//!
//! ```text
//!     a
//!   f   b        bit: 7  6  5  4  3  2  1  0
//!     g                dp g  f  e  d  c  b  a
//!   e   c
//!     d  .
//! ```
//!
//! The segments are common-anode on the board, so the byte shifted out
//! is the inverse of the lit-segment mask.

use crate::drivers::hw_init;
use crate::pins;

const HEX_SEGMENTS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, // 0-7
    0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71, // 8-F
];

/// Upper-case hex character for the low nibble of `value`.
pub const fn hex_glyph(value: u8) -> char {
    let n = value & 0x0F;
    if n < 10 {
        (b'0' + n) as char
    } else {
        (b'A' + n - 10) as char
    }
}

/// Lit-segment mask for a glyph. Unknown characters and `None` are blank.
pub fn segments_for(glyph: Option<char>) -> u8 {
    let Some(c) = glyph else { return 0 };
    match c.to_ascii_uppercase() {
        d @ '0'..='9' => HEX_SEGMENTS[(d as u8 - b'0') as usize],
        h @ 'A'..='F' => HEX_SEGMENTS[(h as u8 - b'A' + 10) as usize],
        '-' => 0x40,
        _ => 0,
    }
}

pub struct SevenSegment {
    shown: Option<Option<char>>,
}

impl SevenSegment {
    pub const fn new() -> Self {
        Self { shown: None }
    }

    /// Show a glyph (or blank). Repeated writes of the same glyph are
    /// skipped.
    pub fn show(&mut self, glyph: Option<char>) {
        if self.shown == Some(glyph) {
            return;
        }
        shift_out(!segments_for(glyph));
        self.shown = Some(glyph);
    }

    pub fn shown(&self) -> Option<char> {
        self.shown.flatten()
    }
}

impl Default for SevenSegment {
    fn default() -> Self {
        Self::new()
    }
}

fn shift_out(byte: u8) {
    hw_init::gpio_write(pins::SEG_LATCH_GPIO, false);
    for bit in (0..8).rev() {
        hw_init::gpio_write(pins::SEG_CLOCK_GPIO, false);
        hw_init::gpio_write(pins::SEG_DATA_GPIO, byte & (1 << bit) != 0);
        hw_init::gpio_write(pins::SEG_CLOCK_GPIO, true);
    }
    hw_init::gpio_write(pins::SEG_LATCH_GPIO, true);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_glyphs() {
        assert_eq!(hex_glyph(0), '0');
        assert_eq!(hex_glyph(9), '9');
        assert_eq!(hex_glyph(10), 'A');
        assert_eq!(hex_glyph(15), 'F');
        assert_eq!(hex_glyph(0x1C), 'C');
    }

    #[test]
    fn segment_masks() {
        assert_eq!(segments_for(Some('8')), 0x7F);
        assert_eq!(segments_for(Some('1')), 0x06);
        assert_eq!(segments_for(Some('b')), 0x7C);
        assert_eq!(segments_for(None), 0);
        assert_eq!(segments_for(Some('z')), 0);
    }

    #[test]
    fn remembers_shown_glyph() {
        let mut seg = SevenSegment::new();
        assert_eq!(seg.shown(), None);
        seg.show(Some('7'));
        assert_eq!(seg.shown(), Some('7'));
        seg.show(None);
        assert_eq!(seg.shown(), None);
    }
}
