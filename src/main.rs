//! HomeWatch firmware: main entry point.
//!
//! Hexagonal architecture with an interrupt-fed main loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  BoardAdapter (sensors, buttons, OLED, 7-seg, LEDs, speaker,   │
//! │                UART)                        LogEventSink        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  FSM · Alerts · Reporter · Game · Melody               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  1 kHz tick timer · GPIO ISRs ──▶ EventQueue                   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info};

use homewatch::adapters::hardware::BoardAdapter;
use homewatch::adapters::log_sink::LogEventSink;
use homewatch::app::service::AppService;
use homewatch::config::SystemConfig;
use homewatch::drivers::hw_init;
use homewatch::drivers::hw_timer::TickTimer;
use homewatch::drivers::oled::Oled;
use homewatch::drivers::watchdog::Watchdog;
use homewatch::events::ISR_EVENTS;
use homewatch::pins;
use homewatch::tick;

/// Fatal boot failure: log and spin. Once the watchdog is armed it resets
/// the chip; a bad configuration spins for good.
fn halt(what: &str, err: &dyn core::fmt::Display) -> ! {
    error!("{} failed: {}, halting", what, err);
    #[allow(clippy::empty_loop)]
    loop {}
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  HomeWatch v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    if let Err(e) = config.validate() {
        halt("config validation", &e);
    }
    let mut watchdog = Watchdog::arm(config.watchdog_timeout_secs);

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals(config.uart_baud) {
        halt("HAL init", &e);
    }

    let peripherals = Peripherals::take()?;
    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ));
    let sensor_bus = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio14,
        peripherals.pins.gpio15,
        &i2c_config,
    )?;
    let oled_bus = I2cDriver::new(
        peripherals.i2c1,
        peripherals.pins.gpio41,
        peripherals.pins.gpio42,
        &i2c_config,
    )?;

    let panel = match Oled::new(oled_bus) {
        Ok(p) => p,
        Err(e) => halt("OLED init", &e),
    };
    let mut hw = BoardAdapter::new(sensor_bus, panel);
    if let Err(e) = hw.init_devices(config.light_low_threshold_lux, config.light_high_threshold_lux) {
        halt("sensor init", &e);
    }

    // ── 4. Time base and interrupts ───────────────────────────
    let _systick = match TickTimer::start() {
        Ok(t) => t,
        Err(e) => halt("tick timer", &e),
    };
    if let Err(e) = hw_init::init_isr_service() {
        halt("ISR service", &e);
    }

    // ── 5. Application core ───────────────────────────────────
    let mut log_sink = LogEventSink::new();
    let mut app = AppService::new(config);
    app.start(tick::now_ms(), &mut hw, &mut log_sink);

    info!("System ready. Entering main loop.");

    // ── 6. Main loop ──────────────────────────────────────────
    loop {
        app.step(tick::now_ms(), &ISR_EVENTS, &mut hw, &mut log_sink);
        watchdog.feed();
        FreeRtos::delay_ms(1);
    }
}
