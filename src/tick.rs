//! Millisecond tick source.
//!
//! A 1 kHz timer callback (see `drivers::hw_timer`) advances `MS_TICKS`.
//! Everything else compares against it through [`TickSnapshot`], whose
//! arithmetic tolerates the `u32` wrap after ~49.7 days.

use core::sync::atomic::{AtomicU32, Ordering};

static MS_TICKS: AtomicU32 = AtomicU32::new(0);

/// Advance the counter by one millisecond. Timer-callback context only.
pub fn on_systick() {
    MS_TICKS.fetch_add(1, Ordering::Relaxed);
}

/// Current millisecond count since boot (wrapping).
pub fn now_ms() -> u32 {
    MS_TICKS.load(Ordering::Relaxed)
}

/// A captured tick value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSnapshot(u32);

impl TickSnapshot {
    pub const fn at(now_ms: u32) -> Self {
        Self(now_ms)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Milliseconds since the snapshot was taken.
    pub const fn elapsed(self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.0)
    }

    pub const fn has_elapsed(self, now_ms: u32, interval_ms: u32) -> bool {
        self.elapsed(now_ms) >= interval_ms
    }

    pub fn rebase(&mut self, now_ms: u32) {
        self.0 = now_ms;
    }
}
