//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to. It contains the last sampled sensor snapshot, the inputs
//! gathered for this iteration, the alert/report/game state, the output
//! requests the service applies to the board, timing information and
//! configuration. Think of it as the "blackboard" in a blackboard
//! architecture.

use heapless::{Deque, Vec};
use log::warn;

use crate::alerts::AlertFlags;
use crate::app::events::AppEvent;
use crate::config::SystemConfig;
use crate::game::GameState;
use crate::melody::MelodyPlayer;
use crate::report::{ReportCycle, ReportSequence, SerialLine};
use crate::screen::ScreenFrame;
use crate::tick::TickSnapshot;

pub use crate::sensors::{Acceleration, SensorSnapshot};

use super::StateId;

/// Serial lines queued but not yet written.
pub const OUTBOX_LEN: usize = 8;
/// Domain notices produced by handlers in one iteration.
pub const NOTICE_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Per-iteration inputs (written by the service before each tick)
// ---------------------------------------------------------------------------

/// Fresh readings gathered for the active mode only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveInputs {
    /// MONITOR: temperature read this iteration.
    pub temperature_tenths: Option<i32>,
    /// MONITOR: acceleration read this iteration.
    pub acceleration: Option<Acceleration>,
    /// GAME: guess button level.
    pub guess_pressed: bool,
}

// ---------------------------------------------------------------------------
// Output requests (written by handlers; consumed by the service)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outputs {
    pub screen: ScreenFrame,
    pub seven_segment: Option<char>,
    pub led_bar: u16,
}

impl Outputs {
    pub fn blank(&mut self) {
        self.screen.clear();
        self.seven_segment = None;
        self.led_bar = 0;
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Millisecond counter at the start of this iteration.
    pub now_ms: u32,
    /// Shared one-second cadence for the report cycle and game scoring.
    pub one_second: TickSnapshot,

    // -- Inputs --
    /// Last sampled sensor values; refreshed at sample steps only.
    pub sensors: SensorSnapshot,
    pub live: LiveInputs,
    /// Mode change requested by the mode button or the rotary encoder.
    pub mode_request: Option<StateId>,

    // -- Domain state --
    pub alerts: AlertFlags,
    /// Acceleration magnitude seen on the previous MONITOR iteration.
    pub prev_magnitude: Option<u32>,
    pub cycle: ReportCycle,
    pub sequence: ReportSequence,
    pub game: GameState,
    pub melody: MelodyPlayer,

    // -- Outputs --
    pub outputs: Outputs,
    /// Light-low threshold (lux) to program into the sensor.
    pub light_rearm: Option<u32>,
    /// Re-sample every sensor after this iteration.
    pub sample_requested: bool,
    pub outbox: Deque<SerialLine, OUTBOX_LEN>,
    pub notices: Vec<AppEvent, NOTICE_LEN>,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            now_ms: 0,
            one_second: TickSnapshot::at(0),
            sensors: SensorSnapshot::default(),
            live: LiveInputs::default(),
            mode_request: None,
            alerts: AlertFlags::default(),
            prev_magnitude: None,
            cycle: ReportCycle::new(config.report_cycle_steps),
            sequence: ReportSequence::new(),
            game: GameState::new(config.game_seed, config.game_bar_limit, config.initial_best_score),
            melody: MelodyPlayer::new(),
            outputs: Outputs::default(),
            light_rearm: None,
            sample_requested: false,
            outbox: Deque::new(),
            notices: Vec::new(),
            config,
        }
    }

    /// `true` once per `cycle_tick_ms`; rebases the shared snapshot.
    pub fn second_elapsed(&mut self) -> bool {
        if self.one_second.has_elapsed(self.now_ms, self.config.cycle_tick_ms) {
            self.one_second.rebase(self.now_ms);
            true
        } else {
            false
        }
    }

    pub fn take_mode_request(&mut self) -> Option<StateId> {
        self.mode_request.take()
    }

    /// Queue a line for the serial link. Dropped with a warning if full.
    pub fn queue_line(&mut self, line: SerialLine) {
        if self.outbox.push_back(line).is_err() {
            warn!("serial outbox full, line dropped");
        }
    }

    pub fn notify(&mut self, event: AppEvent) {
        if self.notices.push(event).is_err() {
            warn!("notice buffer full, event dropped");
        }
    }
}
