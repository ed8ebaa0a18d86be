//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap. Mode changes arrive as `ctx.mode_request`; every
//! update handler honours a pending request before doing anything else.
//!
//! ```text
//!            ┌──[mode button]──────────────┐
//!            ▼                             │
//!  STABLE ──[mode button]──▶ MONITOR ──────┘
//!    ▲  │                       ▲
//!    │  └──[rotary right]──┐    │
//!    │                     ▼    │
//!    └──[rotary left]──── GAME ─┘ [mode button, between rounds]
//! ```

use log::{debug, info};

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use crate::app::events::AppEvent;
use crate::drivers::seven_seg::hex_glyph;
use crate::melody::{CHAMPION_TUNE, WIN_TUNE};
use crate::report::{
    DARKNESS_MESSAGE, FIRE_MESSAGE, MONITOR_ENTRY_MESSAGE, best_score_message, fixed_line,
    status_line,
};
use crate::screen::{game_title_frame, monitor_frame, win_frame};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Stable
        StateDescriptor {
            id: StateId::Stable,
            name: "Stable",
            on_enter: Some(stable_enter),
            on_exit: None,
            on_update: stable_update,
        },
        // Index 1: Monitor
        StateDescriptor {
            id: StateId::Monitor,
            name: "Monitor",
            on_enter: Some(monitor_enter),
            on_exit: Some(monitor_exit),
            on_update: monitor_update,
        },
        // Index 2: Game
        StateDescriptor {
            id: StateId::Game,
            name: "Game",
            on_enter: Some(game_enter),
            on_exit: Some(game_exit),
            on_update: game_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  STABLE: idle, everything blank
// ═══════════════════════════════════════════════════════════════════════════

fn stable_enter(ctx: &mut FsmContext) {
    ctx.alerts.clear_all();
    ctx.light_rearm = Some(ctx.config.light_low_threshold_lux);
    ctx.outputs.blank();
    ctx.melody.stop();
    info!("STABLE: outputs blank, light alarm re-armed");
}

fn stable_update(ctx: &mut FsmContext) -> Option<StateId> {
    if let Some(next) = ctx.take_mode_request() {
        return Some(next);
    }
    ctx.alerts.clear_detections();
    ctx.outputs.blank();
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  MONITOR: alerts, step display and the periodic report
// ═══════════════════════════════════════════════════════════════════════════

fn monitor_enter(ctx: &mut FsmContext) {
    ctx.cycle.reset();
    ctx.prev_magnitude = None;
    ctx.outputs.blank();
    ctx.outputs.screen = monitor_frame(&ctx.sensors);
    ctx.queue_line(fixed_line(MONITOR_ENTRY_MESSAGE));
    info!("MONITOR: cycle reset, sequence at {:03}", ctx.sequence.value());
}

fn monitor_exit(ctx: &mut FsmContext) {
    ctx.prev_magnitude = None;
    ctx.sample_requested = false;
}

fn monitor_update(ctx: &mut FsmContext) -> Option<StateId> {
    if let Some(next) = ctx.take_mode_request() {
        return Some(next);
    }

    evaluate_alerts(ctx);

    if ctx.second_elapsed() {
        let shown = ctx.cycle.advance();
        ctx.outputs.seven_segment = Some(hex_glyph(shown));

        if ctx.cycle.is_report_step() {
            send_report(ctx);
        }
        if ctx.cycle.is_sample_step(&ctx.config.sample_steps) {
            ctx.sample_requested = true;
        }
    }

    ctx.outputs.screen = monitor_frame(&ctx.sensors);
    None
}

fn evaluate_alerts(ctx: &mut FsmContext) {
    if let Some(t) = ctx.live.temperature_tenths {
        if ctx.alerts.observe_temperature(t, ctx.config.temperature_alarm_tenths) {
            ctx.notify(AppEvent::FireDetected { temperature_tenths: t });
        }
    }

    if let Some(accel) = ctx.live.acceleration {
        let magnitude = accel.magnitude();
        if ctx.alerts.observe_motion(
            ctx.prev_magnitude,
            magnitude,
            ctx.config.motion_delta_threshold,
        ) {
            ctx.notify(AppEvent::WalkingInDarkDetected);
        }
        ctx.prev_magnitude = Some(magnitude);
    }
}

fn send_report(ctx: &mut FsmContext) {
    if ctx.alerts.is_fire {
        ctx.queue_line(fixed_line(FIRE_MESSAGE));
    }
    if ctx.alerts.is_walking_dark {
        ctx.queue_line(fixed_line(DARKNESS_MESSAGE));
    }
    let line = status_line(&ctx.sequence, &ctx.sensors);
    debug!("report: {}", line.trim_end());
    ctx.queue_line(line);
    ctx.notify(AppEvent::ReportSent {
        sequence: ctx.sequence.value(),
    });
    ctx.sequence.increment();
}

// ═══════════════════════════════════════════════════════════════════════════
//  GAME: guess the number
// ═══════════════════════════════════════════════════════════════════════════

fn game_enter(ctx: &mut FsmContext) {
    ctx.game.reset_score();
    start_round(ctx);
    info!("GAME: best score {}", ctx.game.best());
}

fn game_exit(ctx: &mut FsmContext) {
    ctx.game.end_round();
    ctx.melody.stop();
    ctx.outputs.led_bar = 0;
}

fn game_update(ctx: &mut FsmContext) -> Option<StateId> {
    if let Some(next) = ctx.take_mode_request() {
        return Some(next);
    }

    // Scoring pauses while a tune plays.
    if ctx.melody.is_busy() {
        return None;
    }

    if !ctx.game.round_active() {
        start_round(ctx);
        return None;
    }

    if ctx.second_elapsed() {
        let tick = ctx.game.second_elapsed();
        ctx.outputs.led_bar = tick.bar;
        ctx.outputs.seven_segment = Some(hex_glyph(tick.target));
        if tick.round_over {
            info!("GAME: round over, score {}", ctx.game.score());
            ctx.notify(AppEvent::RoundLost);
            return None;
        }
    }

    if let Some(win) = ctx.game.check_guess(ctx.live.guess_pressed) {
        ctx.outputs.screen = win_frame(win.score);
        ctx.melody.play(WIN_TUNE);
        if let Some(best) = win.new_best {
            ctx.queue_line(best_score_message(best));
            ctx.melody.enqueue(CHAMPION_TUNE);
        }
        info!("GAME: win with score {} (best {})", win.score, ctx.game.best());
        ctx.notify(AppEvent::GameWon {
            score: win.score,
            new_best: win.new_best,
        });
    }
    None
}

fn start_round(ctx: &mut FsmContext) {
    ctx.game.start_round();
    ctx.outputs.blank();
    ctx.outputs.screen = game_title_frame();
    ctx.notify(AppEvent::RoundStarted);
}
