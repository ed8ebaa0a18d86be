//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them (log to the console, count them in a
//! test, ...).

use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between modes.
    ModeChanged { from: StateId, to: StateId },

    /// The light sensor reported ambient light below the low threshold.
    DarknessDetected,

    /// Temperature rose above the alarm threshold.
    FireDetected { temperature_tenths: i32 },

    /// Motion detected while dark.
    WalkingInDarkDetected,

    /// A status line went out on the serial link.
    ReportSent { sequence: u16 },

    /// The guess matched the target.
    GameWon { score: u32, new_best: Option<u32> },

    /// A new guessing round began.
    RoundStarted,

    /// The LED bar filled up without a correct guess.
    RoundLost,

    /// ISR events were lost because the queue was full.
    EventsDropped(u32),

    /// A serial write failed; the line was discarded.
    SerialFailed,
}
