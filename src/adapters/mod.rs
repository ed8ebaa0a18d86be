//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                          |
//! |------------|---------------|--------------------------------------|
//! | `hardware` | SensorPort    | NTC ADC, ISL29003, MMA7455 (I²C)     |
//! |            | InputPort     | mode / guess buttons (GPIO)          |
//! |            | DisplayPort   | SSD1306 OLED, 74HC595 7-segment      |
//! |            | IndicatorPort | RGB LED, PCA9532 bar, piezo (LEDC)   |
//! |            | SerialPort    | UART1                                |
//! | `log_sink` | EventSink     | Serial log output                    |

pub mod hardware;
pub mod log_sink;
