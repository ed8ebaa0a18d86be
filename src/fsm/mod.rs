//! Mode controller: a table of plain `fn` handlers, one row per mode.
//!
//! ```text
//!  StateId   on_enter        on_exit        on_update
//!  ───────   ─────────────   ────────────   ──────────────
//!  Stable    stable_enter    -              stable_update
//!  Monitor   monitor_enter   monitor_exit   monitor_update
//!  Game      game_enter      game_exit      game_update
//! ```
//!
//! [`Fsm::tick`] runs the active row's `on_update`. A handler asks to
//! leave by returning `Some(next)`; the engine then runs `on_exit` of the
//! old mode and `on_enter` of the new one. Asking for the mode already
//! active does nothing, so entry actions only run on a real change.
//! Handlers only ever see [`FsmContext`]; they never touch hardware.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

/// The three operating modes, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Stable = 0,
    Monitor = 1,
    Game = 2,
}

impl StateId {
    pub const COUNT: usize = 3;

    /// Table index back to a mode. Out of range trips a debug assertion
    /// and falls back to `Stable`.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Stable,
            1 => Self::Monitor,
            2 => Self::Game,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Stable
            }
        }
    }
}

/// Entry or exit action.
pub type StateActionFn = fn(&mut FsmContext);

/// Per-iteration handler. `Some(next)` requests a mode change.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

/// One row of the mode table.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

pub struct Fsm {
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
    tick_count: u64,
    state_entry_tick: u64,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "mode table out of order"
        );
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the boot mode's `on_enter`. Call once before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("mode controller up in {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// One main-loop iteration of the active mode.
    pub fn tick(&mut self, ctx: &mut FsmContext) {
        self.tick_count += 1;
        let next = (self.table[self.current].on_update)(ctx);
        if let Some(next_id) = next {
            self.change_to(next_id, ctx);
        }
    }

    /// Change mode now, without waiting for a handler to ask.
    #[cfg(test)]
    pub(crate) fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        self.change_to(next, ctx);
    }

    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// Iterations spent in the active mode since it was entered.
    fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    fn change_to(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;
        if next_idx == self.current {
            return;
        }

        info!(
            "mode {} -> {} after {} iterations",
            self.table[self.current].name,
            self.table[next_idx].name,
            self.ticks_in_current_state()
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
