//! Inbound commands to the application service.
//!
//! These represent user actions (mode button, rotary selection) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::drivers::rotary::ModeRequest;

/// Commands that input adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// A debounced press of the mode button.
    ModeButtonPressed,

    /// The rotary encoder selected a mode.
    SelectMode(ModeRequest),
}
