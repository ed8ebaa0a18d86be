//! GPIO / peripheral pin assignments for the HomeWatch base board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Push buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// SW4: mode button (STABLE ⇄ MONITOR, GAME → MONITOR).
pub const MODE_BUTTON_GPIO: i32 = 16;
/// SW3: guess button in GAME mode.
pub const GUESS_BUTTON_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// Rotary encoder (quadrature, any-edge interrupts)
// ---------------------------------------------------------------------------

pub const ROTARY_A_GPIO: i32 = 38;
pub const ROTARY_B_GPIO: i32 = 39;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// ISL29003 interrupt output (open-drain, active-low).
pub const LIGHT_INT_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// I²C buses
// ---------------------------------------------------------------------------

/// I2C0: ISL29003 light sensor, MMA7455 accelerometer, PCA9532 LED bar.
pub const I2C0_SDA_GPIO: i32 = 14;
pub const I2C0_SCL_GPIO: i32 = 15;
/// I2C1: SSD1306 OLED.
pub const I2C1_SDA_GPIO: i32 = 41;
pub const I2C1_SCL_GPIO: i32 = 42;
pub const I2C_FREQ_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// Tri-colour LED (discrete, active-high)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// 7-segment display (74HC595 shift register)
// ---------------------------------------------------------------------------

pub const SEG_DATA_GPIO: i32 = 5;
pub const SEG_CLOCK_GPIO: i32 = 6;
pub const SEG_LATCH_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Piezo speaker (LEDC square wave, 50% duty)
// ---------------------------------------------------------------------------

pub const SPEAKER_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// UART (serial status link)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
pub const UART_PORT: i32 = 1;
