//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod button;
pub mod hw_init;
pub mod hw_timer;
pub mod led_bar;
pub mod led_patterns;
pub mod oled;
pub mod rotary;
pub mod seven_seg;
pub mod speaker;
pub mod status_led;
pub mod uart;
pub mod watchdog;
