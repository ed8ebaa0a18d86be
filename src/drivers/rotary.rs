//! Rotary encoder: quadrature decode (ISR side) and mode decision (main
//! loop side).
//!
//! ## Hardware
//!
//! Two open-drain quadrature outputs with pull-ups, both wired to
//! any-edge GPIO interrupts. The ISR samples both pins, decodes the
//! transition against the previous sample, and pushes
//! `Event::RotaryMoved` onto the inbox.
//!
//! ## Decision
//!
//! ```text
//!   Right   ──▶ select GAME   (remembered)
//!   Left    ──▶ select STABLE (remembered)
//!   Neutral ──▶ repeat the remembered decision, if any
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RotaryDirection {
    Neutral = 0,
    Right = 1,
    Left = 2,
}

impl RotaryDirection {
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Neutral),
            1 => Some(Self::Right),
            2 => Some(Self::Left),
            _ => None,
        }
    }
}

/// Mode the encoder asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeRequest {
    Game,
    Stable,
}

/// Three-input decision machine with a "last decision" cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotaryDecoder {
    last: Option<ModeRequest>,
}

impl RotaryDecoder {
    pub const fn new() -> Self {
        Self { last: None }
    }

    pub fn decide(&mut self, direction: RotaryDirection) -> Option<ModeRequest> {
        match direction {
            RotaryDirection::Right => self.last = Some(ModeRequest::Game),
            RotaryDirection::Left => self.last = Some(ModeRequest::Stable),
            RotaryDirection::Neutral => {}
        }
        self.last
    }

    #[cfg(test)]
    fn last_decision(&self) -> Option<ModeRequest> {
        self.last
    }
}

// ── Quadrature decode ─────────────────────────────────────────

/// Direction for a transition between two 2-bit pin states `(a << 1) | b`.
/// Invalid (double-step) or idle transitions decode as `Neutral`.
pub const fn decode_transition(prev: u8, next: u8) -> RotaryDirection {
    match ((prev & 0b11) << 2) | (next & 0b11) {
        0b0001 | 0b0111 | 0b1110 | 0b1000 => RotaryDirection::Right,
        0b0010 | 0b1011 | 0b1101 | 0b0100 => RotaryDirection::Left,
        _ => RotaryDirection::Neutral,
    }
}

/// Last sampled pin state. Written only by the rotary ISR.
static LAST_PIN_STATE: AtomicU8 = AtomicU8::new(0b11);

/// ISR handler: decode the new pin levels and enqueue the result.
/// Lock-free; safe from interrupt context.
pub fn rotary_isr_handler(a_high: bool, b_high: bool) {
    let next = (u8::from(a_high) << 1) | u8::from(b_high);
    let prev = LAST_PIN_STATE.swap(next, Ordering::Relaxed);
    let direction = decode_transition(prev, next);
    crate::events::ISR_EVENTS.push(crate::events::Event::RotaryMoved(direction));
}
