//! HomeWatch base-board firmware library.
//!
//! Exposes the pure-logic modules for integration testing and the
//! target binary. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alerts;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod game;
pub mod melody;
pub mod pins;
pub mod report;
pub mod screen;
pub mod tick;

// Hardware-facing modules; the register-level paths are cfg-gated inside
// and fall back to simulation stubs on the host.
pub mod adapters;
pub mod drivers;
pub mod sensors;
