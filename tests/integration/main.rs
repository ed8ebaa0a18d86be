//! Integration test harness.
//!
//! Drives the [`AppService`](homewatch::app::service::AppService) through
//! simulated time against a recording mock board. Run with:
//! `cargo test --test integration`

mod game_tests;
mod mock_hw;
mod mode_tests;
mod monitor_tests;
