//! Mock board for integration tests.
//!
//! Records every output call so tests can assert on the full command
//! history without touching real GPIO / I²C / UART registers, and serves
//! sensor values the test sets directly.

use homewatch::app::events::AppEvent;
use homewatch::app::ports::{DisplayPort, EventSink, IndicatorPort, InputPort, SensorPort, SerialPort};
use homewatch::app::service::AppService;
use homewatch::config::SystemConfig;
use homewatch::drivers::led_patterns::Rgb;
use homewatch::drivers::rotary::RotaryDirection;
use homewatch::error::{CommsError, SensorError};
use homewatch::events::{Event, EventQueue};
use homewatch::melody::Note;
use homewatch::screen::ScreenFrame;
use homewatch::sensors::Acceleration;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCall {
    Screen(ScreenFrame),
    SevenSegment(Option<char>),
    LedBar(u16),
    Rgb(Rgb),
    Tone(Option<Note>),
    LightThreshold(u32),
    AckLight,
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub temperature_tenths: i32,
    pub light_lux: u32,
    pub acceleration: Acceleration,
    pub fail_temperature: bool,
    pub fail_serial: bool,
    pub mode_pressed: bool,
    pub guess_pressed: bool,
    /// Number of full light reads (only sample-step refreshes read light).
    pub light_reads: u32,
    pub calls: Vec<BoardCall>,
    pub serial: Vec<String>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self {
            temperature_tenths: 225,
            light_lux: 120,
            acceleration: Acceleration::new(0, 0, 64),
            fail_temperature: false,
            fail_serial: false,
            mode_pressed: false,
            guess_pressed: false,
            light_reads: 0,
            calls: Vec::new(),
            serial: Vec::new(),
        }
    }

    pub fn last_screen(&self) -> Option<&ScreenFrame> {
        self.calls.iter().rev().find_map(|c| match c {
            BoardCall::Screen(f) => Some(f),
            _ => None,
        })
    }

    pub fn last_seven_segment(&self) -> Option<char> {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                BoardCall::SevenSegment(g) => Some(*g),
                _ => None,
            })
            .flatten()
    }

    pub fn last_led_bar(&self) -> u16 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                BoardCall::LedBar(p) => Some(*p),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn rgb_history(&self) -> Vec<Rgb> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BoardCall::Rgb(rgb) => Some(*rgb),
                _ => None,
            })
            .collect()
    }

    pub fn notes_played(&self) -> Vec<Note> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BoardCall::Tone(Some(n)) => Some(*n),
                _ => None,
            })
            .collect()
    }

    pub fn thresholds(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BoardCall::LightThreshold(lux) => Some(*lux),
                _ => None,
            })
            .collect()
    }

    pub fn serial_count(&self, needle: &str) -> usize {
        self.serial.iter().filter(|l| l.contains(needle)).count()
    }

    pub fn status_lines(&self) -> Vec<&String> {
        self.serial.iter().filter(|l| l.contains("_-_T")).collect()
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockBoard {
    fn read_temperature(&mut self) -> Result<i32, SensorError> {
        if self.fail_temperature {
            Err(SensorError::AdcReadFailed)
        } else {
            Ok(self.temperature_tenths)
        }
    }

    fn read_light(&mut self) -> Result<u32, SensorError> {
        self.light_reads += 1;
        Ok(self.light_lux)
    }

    fn read_acceleration(&mut self) -> Result<Acceleration, SensorError> {
        Ok(self.acceleration)
    }

    fn set_light_low_threshold(&mut self, lux: u32) {
        self.calls.push(BoardCall::LightThreshold(lux));
    }

    fn acknowledge_light_interrupt(&mut self) {
        self.calls.push(BoardCall::AckLight);
    }
}

impl InputPort for MockBoard {
    fn mode_button_pressed(&mut self) -> bool {
        self.mode_pressed
    }

    fn guess_button_pressed(&mut self) -> bool {
        self.guess_pressed
    }
}

impl DisplayPort for MockBoard {
    fn show_screen(&mut self, frame: &ScreenFrame) -> Result<(), CommsError> {
        self.calls.push(BoardCall::Screen(frame.clone()));
        Ok(())
    }

    fn set_seven_segment(&mut self, glyph: Option<char>) {
        self.calls.push(BoardCall::SevenSegment(glyph));
    }
}

impl IndicatorPort for MockBoard {
    fn set_rgb(&mut self, colour: Rgb) {
        self.calls.push(BoardCall::Rgb(colour));
    }

    fn set_led_bar(&mut self, pattern: u16) {
        self.calls.push(BoardCall::LedBar(pattern));
    }

    fn set_tone(&mut self, note: Option<Note>) {
        self.calls.push(BoardCall::Tone(note));
    }
}

impl SerialPort for MockBoard {
    fn send(&mut self, bytes: &[u8]) -> Result<(), CommsError> {
        if self.fail_serial {
            return Err(CommsError::UartWriteFailed);
        }
        self.serial.push(String::from_utf8_lossy(bytes).into_owned());
        Ok(())
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Test rig ──────────────────────────────────────────────────

/// Main-loop period the rig simulates.
pub const STEP_MS: u32 = 10;

/// Service, board, sink and a private inbox, driven by simulated time.
pub struct Rig {
    pub app: AppService,
    pub hw: MockBoard,
    pub sink: RecordingSink,
    pub inbox: EventQueue,
    pub now: u32,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        Self::starting_at(config, 0)
    }

    /// Boot at `now` and idle in STABLE until the mode button settles.
    pub fn starting_at(config: SystemConfig, now: u32) -> Self {
        let settle = config.mode_button_debounce_ms;
        let mut rig = Self::booted_at(config, now);
        rig.run_for(settle);
        rig
    }

    /// Boot at `now` and stop; the mode button is still settling.
    pub fn booted_at(config: SystemConfig, now: u32) -> Self {
        let mut rig = Self {
            app: AppService::new(config),
            hw: MockBoard::new(),
            sink: RecordingSink::new(),
            inbox: EventQueue::new(),
            now,
        };
        rig.app.start(rig.now, &mut rig.hw, &mut rig.sink);
        rig
    }

    /// One main-loop iteration at the current time.
    pub fn step(&mut self) {
        self.app.step(self.now, &self.inbox, &mut self.hw, &mut self.sink);
    }

    /// Run iterations every `STEP_MS` until `ms` have passed.
    pub fn run_for(&mut self, ms: u32) {
        for _ in 0..ms / STEP_MS {
            self.now = self.now.wrapping_add(STEP_MS);
            self.step();
        }
    }

    /// Hold the mode button for exactly one iteration.
    pub fn tap_mode(&mut self) {
        self.hw.mode_pressed = true;
        self.now = self.now.wrapping_add(STEP_MS);
        self.step();
        self.hw.mode_pressed = false;
    }

    pub fn rotate(&mut self, direction: RotaryDirection) {
        assert!(self.inbox.push(Event::RotaryMoved(direction)));
        self.now = self.now.wrapping_add(STEP_MS);
        self.step();
    }

    pub fn light_low(&mut self) {
        assert!(self.inbox.push(Event::LightLow));
        self.now = self.now.wrapping_add(STEP_MS);
        self.step();
    }

    /// Enter MONITOR from boot and forget the boot-time output history.
    pub fn into_monitor() -> Self {
        let mut rig = Self::new();
        rig.tap_mode();
        rig.hw.calls.clear();
        rig.hw.serial.clear();
        rig
    }
}
