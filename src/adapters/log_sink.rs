//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC console on target, stderr in host tests).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::report::Tenths;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_mode={:?}", state);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE  | {:?} -> {:?}", from, to);
            }
            AppEvent::DarknessDetected => {
                info!("ALERT | darkness");
            }
            AppEvent::FireDetected { temperature_tenths } => {
                warn!("ALERT | fire, T={}\u{00b0}C", Tenths(*temperature_tenths));
            }
            AppEvent::WalkingInDarkDetected => {
                warn!("ALERT | movement in darkness");
            }
            AppEvent::ReportSent { sequence } => {
                info!("REPORT| seq={:03}", sequence);
            }
            AppEvent::GameWon { score, new_best } => match new_best {
                Some(best) => info!("GAME  | win score={} NEW BEST={}", score, best),
                None => info!("GAME  | win score={}", score),
            },
            AppEvent::RoundStarted => {
                info!("GAME  | round started");
            }
            AppEvent::RoundLost => {
                info!("GAME  | round over");
            }
            AppEvent::EventsDropped(n) => {
                warn!("INBOX | {} event(s) dropped", n);
            }
            AppEvent::SerialFailed => {
                warn!("UART  | write failed");
            }
        }
    }
}
