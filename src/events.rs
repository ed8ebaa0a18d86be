//! Interrupt-driven event inbox.
//!
//! Events are produced by GPIO ISRs (light-threshold crossing, rotary
//! encoder edges) and consumed once per main-loop iteration by
//! [`AppService::step`](crate::app::service::AppService::step).
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Light ISR    │────▶│  EventQueue  │────▶│  Main Loop   │
//! │ Rotary ISR   │────▶│  (lock-free) │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The ring stores each event as one byte so ISRs never touch anything
//! wider than an atomic `u8`.

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use crate::drivers::rotary::RotaryDirection;

/// Maximum number of pending events (one slot is kept free).
/// Power of 2 for efficient ring buffer modulo.
pub const EVENT_QUEUE_CAP: usize = 32;

/// Events raised from interrupt context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Ambient light fell below the programmed low threshold.
    LightLow,
    /// Rotary encoder moved (or settled, for `Neutral`).
    RotaryMoved(RotaryDirection),
}

// ── Byte encoding ─────────────────────────────────────────────

const TAG_LIGHT_LOW: u8 = 0x01;
const TAG_ROTARY: u8 = 0x10;

impl Event {
    const fn to_u8(self) -> u8 {
        match self {
            Self::LightLow => TAG_LIGHT_LOW,
            Self::RotaryMoved(dir) => TAG_ROTARY | dir as u8,
        }
    }
}

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        TAG_LIGHT_LOW => Some(Event::LightLow),
        r if r & 0xF0 == TAG_ROTARY => RotaryDirection::from_u8(r & 0x0F).map(Event::RotaryMoved),
        _ => None,
    }
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// ISRs write (produce), main loop reads (consume). Both ISRs run on the
// same core at the same priority, so there is a single producer at any
// instant.

pub struct EventQueue {
    head: AtomicU8,
    tail: AtomicU8,
    dropped: AtomicU32,
    buffer: [AtomicU8; EVENT_QUEUE_CAP],
}

/// The board-wide inbox shared by every ISR and the main loop.
pub static ISR_EVENTS: EventQueue = EventQueue::new();

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            head: AtomicU8::new(0),
            tail: AtomicU8::new(0),
            dropped: AtomicU32::new(0),
            buffer: [const { AtomicU8::new(0) }; EVENT_QUEUE_CAP],
        }
    }

    /// Push an event into the queue.
    /// Safe to call from ISR context (lock-free).
    /// Returns `false` if the queue is full (event dropped and counted).
    pub fn push(&self, event: Event) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

        if next_head == tail {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        self.buffer[head as usize].store(event.to_u8(), Ordering::Relaxed);
        self.head.store(next_head, Ordering::Release);
        true
    }

    /// Pop the next event. Main loop only (single consumer).
    pub fn pop(&self) -> Option<Event> {
        loop {
            let tail = self.tail.load(Ordering::Relaxed);
            let head = self.head.load(Ordering::Acquire);

            if tail == head {
                return None;
            }

            let raw = self.buffer[tail as usize].load(Ordering::Relaxed);
            self.tail
                .store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

            // Unknown bytes are skipped rather than ending the drain.
            if let Some(event) = event_from_u8(raw) {
                return Some(event);
            }
        }
    }

    /// Drain all pending events into a callback, FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(Event)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        tail == head
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed) as usize;
        let tail = self.tail.load(Ordering::Relaxed) as usize;
        (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
    }

    /// Return and reset the overflow counter.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
