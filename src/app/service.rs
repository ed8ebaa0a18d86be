//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the FSM, the shared context, and the per-iteration
//! helpers that live outside the state handlers (mode-button debounce,
//! rotary decoder, alert blinker). It exposes a hardware-agnostic API.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  EventQueue ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │        AppService         │
//!  Board ports ◀─▶│  FSM · Debounce · Blink   │
//!                 └──────────────────────────┘
//! ```
//!
//! One call to [`AppService::step`] is one main-loop iteration.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::drivers::button::DebouncedButton;
use crate::drivers::led_patterns::{AlertBlinker, COLOUR_OFF, Rgb};
use crate::drivers::rotary::{ModeRequest, RotaryDecoder};
use crate::events::{Event, EventQueue};
use crate::fsm::context::{FsmContext, LiveInputs};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::melody::Note;
use crate::screen::ScreenFrame;
use crate::sensors::SensorSnapshot;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{Board, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// Output shadow
// ───────────────────────────────────────────────────────────────

/// What was last written to each output, so unchanged values are not
/// rewritten every iteration. `None` means "unknown, write next time".
#[derive(Default)]
struct Shown {
    screen: Option<ScreenFrame>,
    seven_segment: Option<Option<char>>,
    led_bar: Option<u16>,
    rgb: Option<Rgb>,
    tone: Option<Option<Note>>,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    mode_button: DebouncedButton,
    rotary: RotaryDecoder,
    blinker: AlertBlinker,
    shown: Shown,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let mode_button = DebouncedButton::new(config.mode_button_debounce_ms);
        let blinker = AlertBlinker::new(config.blink_half_period_ms);
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Stable);

        Self {
            fsm,
            ctx,
            mode_button,
            rotary: RotaryDecoder::new(),
            blinker,
            shown: Shown::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Take the boot-time sensor sample and enter STABLE.
    pub fn start(&mut self, now_ms: u32, hw: &mut impl Board, sink: &mut impl EventSink) {
        self.ctx.now_ms = now_ms;
        self.ctx.one_second.rebase(now_ms);
        self.mode_button.arm(now_ms);
        self.ctx.sensors.refresh(hw);
        self.fsm.start(&mut self.ctx);
        self.apply_outputs(hw);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one main-loop iteration: inbox → mode button → inputs → FSM →
    /// outputs → serial.
    pub fn step(
        &mut self,
        now_ms: u32,
        inbox: &EventQueue,
        hw: &mut impl Board,
        sink: &mut impl EventSink,
    ) {
        self.ctx.now_ms = now_ms;
        let prev_state = self.fsm.current_state();

        // 1. Interrupt inbox
        inbox.drain(|event| self.handle_event(event, &mut *hw, &mut *sink));
        let dropped = inbox.take_dropped();
        if dropped > 0 {
            warn!("event inbox overflowed, {} event(s) lost", dropped);
            sink.emit(&AppEvent::EventsDropped(dropped));
        }

        // 2. Mode button (not sampled while a game round runs)
        if self.mode_button_enabled()
            && self.mode_button.sample(hw.mode_button_pressed(), now_ms)
        {
            self.handle_command(AppCommand::ModeButtonPressed);
        }

        // 3. Inputs for the active handler
        self.gather_inputs(hw);

        // 4. Dispatch
        self.fsm.tick(&mut self.ctx);

        // 5. Sample-step refresh
        if core::mem::take(&mut self.ctx.sample_requested) {
            self.ctx.sensors.refresh(hw);
        }

        // 6. Outputs, light alarm, blink, melody, serial
        self.apply_outputs(hw);
        self.flush_serial(hw, sink);

        // 7. Notices and mode change
        for notice in core::mem::take(&mut self.ctx.notices) {
            sink.emit(&notice);
        }
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::ModeChanged {
                from: prev_state,
                to: new_state,
            });
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Interpret a user command. Mode changes take effect on the next FSM
    /// tick; the latest command in an iteration wins.
    pub fn handle_command(&mut self, cmd: AppCommand) {
        let current = self.fsm.current_state();
        match cmd {
            AppCommand::ModeButtonPressed => {
                let target = match current {
                    StateId::Monitor => StateId::Stable,
                    StateId::Stable | StateId::Game => StateId::Monitor,
                };
                info!("mode button: {:?} -> {:?}", current, target);
                self.ctx.mode_request = Some(target);
            }
            AppCommand::SelectMode(ModeRequest::Game) => {
                self.ctx.game.reset_score();
                self.ctx.mode_request = Some(StateId::Game);
            }
            AppCommand::SelectMode(ModeRequest::Stable) => {
                self.ctx.mode_request = Some(StateId::Stable);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn context(&self) -> &FsmContext {
        &self.ctx
    }

    pub fn sensors(&self) -> &SensorSnapshot {
        &self.ctx.sensors
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn handle_event(&mut self, event: Event, hw: &mut impl SensorPort, sink: &mut impl EventSink) {
        match event {
            Event::LightLow => {
                self.ctx.alerts.is_dark = true;
                hw.set_light_low_threshold(0);
                hw.acknowledge_light_interrupt();
                info!("light below threshold, darkness latched");
                sink.emit(&AppEvent::DarknessDetected);
            }
            Event::RotaryMoved(direction) => {
                if let Some(request) = self.rotary.decide(direction) {
                    self.handle_command(AppCommand::SelectMode(request));
                }
            }
        }
    }

    fn mode_button_enabled(&self) -> bool {
        !(self.fsm.current_state() == StateId::Game && self.ctx.game.round_active())
    }

    fn gather_inputs(&mut self, hw: &mut impl Board) {
        let mut live = LiveInputs::default();
        match self.fsm.current_state() {
            StateId::Monitor => {
                live.temperature_tenths = hw
                    .read_temperature()
                    .map_err(|e| warn!("live temperature read failed: {}", e))
                    .ok();
                live.acceleration = hw
                    .read_acceleration()
                    .map_err(|e| warn!("live acceleration read failed: {}", e))
                    .ok();
            }
            StateId::Game => live.guess_pressed = hw.guess_button_pressed(),
            StateId::Stable => {}
        }
        self.ctx.live = live;
    }

    /// Translate the handler's output requests into port calls.
    fn apply_outputs(&mut self, hw: &mut impl Board) {
        let out = &self.ctx.outputs;

        if self.shown.screen.as_ref() != Some(&out.screen) {
            if let Err(e) = hw.show_screen(&out.screen) {
                warn!("screen update failed: {}", e);
            }
            self.shown.screen = Some(out.screen.clone());
        }
        if self.shown.seven_segment != Some(out.seven_segment) {
            hw.set_seven_segment(out.seven_segment);
            self.shown.seven_segment = Some(out.seven_segment);
        }
        if self.shown.led_bar != Some(out.led_bar) {
            hw.set_led_bar(out.led_bar);
            self.shown.led_bar = Some(out.led_bar);
        }

        if let Some(lux) = self.ctx.light_rearm.take() {
            hw.set_light_low_threshold(lux);
        }

        let colour = if self.fsm.current_state() == StateId::Monitor {
            self.blinker.tick(self.ctx.alerts.signal(), self.ctx.now_ms)
        } else {
            self.blinker.cancel();
            COLOUR_OFF
        };
        if self.shown.rgb != Some(colour) {
            hw.set_rgb(colour);
            self.shown.rgb = Some(colour);
        }

        let note = self.ctx.melody.tick(self.ctx.now_ms);
        if self.shown.tone != Some(note) {
            hw.set_tone(note);
            self.shown.tone = Some(note);
        }
    }

    fn flush_serial(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) {
        while let Some(line) = self.ctx.outbox.pop_front() {
            if let Err(e) = hw.send(line.as_bytes()) {
                warn!("serial write failed ({}), dropped: {}", e, line.trim_end());
                sink.emit(&AppEvent::SerialFailed);
            }
        }
    }
}
