//! Guess-the-number game state.
//!
//! Each round the LED bar fills one LED per second (pattern `1, 3, 7, …`)
//! while a fresh random hex digit is shown every second. Pressing the
//! guess button while the number of lit LEDs equals the digit wins. The
//! score counts seconds; lower is better and the best score survives mode
//! changes.

/// Xorshift32 generator for the target digit.
#[derive(Debug, Clone, Copy)]
pub struct XorShift32(u32);

impl XorShift32 {
    /// A zero seed would lock the generator at zero; it is replaced.
    pub const fn new(seed: u32) -> Self {
        Self(if seed == 0 { 0x9E37_79B9 } else { seed })
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

/// What one elapsed game second produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondTick {
    /// Pattern to show on the LED bar.
    pub bar: u16,
    /// New target digit, 0..=15.
    pub target: u8,
    /// The bar overflowed; this round is over.
    pub round_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Win {
    pub score: u32,
    /// `Some(best)` if this win set a new best score.
    pub new_best: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    rng: XorShift32,
    bar_limit: u32,
    score: u32,
    best: u32,
    bar: u32,
    led_counter: u32,
    target: u8,
    round_active: bool,
}

impl GameState {
    pub fn new(seed: u32, bar_limit: u32, initial_best: u32) -> Self {
        Self {
            rng: XorShift32::new(seed),
            bar_limit,
            score: 0,
            best: initial_best,
            bar: 1,
            led_counter: 0,
            target: 0,
            round_active: false,
        }
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn start_round(&mut self) {
        self.bar = 1;
        self.led_counter = 0;
        self.round_active = true;
    }

    pub fn end_round(&mut self) {
        self.round_active = false;
    }

    /// Check the guess button. A win leaves the round running.
    pub fn check_guess(&mut self, pressed: bool) -> Option<Win> {
        if !pressed || u32::from(self.target) != self.led_counter {
            return None;
        }
        let score = self.score;
        let new_best = (score < self.best).then(|| {
            self.best = score;
            self.score = 0;
            score
        });
        Some(Win { score, new_best })
    }

    pub fn second_elapsed(&mut self) -> SecondTick {
        self.score += 1;
        let shown = self.bar as u16;
        self.bar = 2 * self.bar + 1;
        self.led_counter += 1;
        self.target = (self.rng.next_u32() % 16) as u8;
        if self.bar > self.bar_limit {
            self.round_active = false;
        }
        SecondTick { bar: shown, target: self.target, round_over: !self.round_active }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn led_counter(&self) -> u32 {
        self.led_counter
    }

    pub fn round_active(&self) -> bool {
        self.round_active
    }
}
