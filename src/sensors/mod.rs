//! Sensor subsystem: individual drivers and the shared reading types.
//!
//! Three sensors feed the control loop:
//!
//! | Sensor      | Part     | Bus  | Unit              |
//! |-------------|----------|------|-------------------|
//! | Temperature | NTC 10 k | ADC  | tenths of °C      |
//! | Light       | ISL29003 | I²C  | lux               |
//! | Accel       | MMA7455  | I²C  | signed 8-bit/axis |
//!
//! [`SensorSnapshot::refresh`] re-samples all three through the
//! [`SensorPort`] and keeps the previous good value for any sensor that
//! fails.

pub mod accel;
pub mod light;
pub mod temperature;

#[cfg(test)]
pub(crate) mod fake_bus;

use log::warn;

use crate::app::ports::SensorPort;

/// 3-axis acceleration, one signed byte per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Acceleration {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Acceleration {
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Euclidean magnitude, truncated to an integer.
    pub fn magnitude(&self) -> u32 {
        let sq = |v: i8| (i32::from(v) * i32::from(v)) as u32;
        (sq(self.x) + sq(self.y) + sq(self.z)).isqrt()
    }
}

/// Last sampled value of every sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    pub temperature_tenths: i32,
    pub light_lux: u32,
    pub acceleration: Acceleration,
}

impl SensorSnapshot {
    /// Re-sample every sensor. A failed read keeps its previous value.
    pub fn refresh(&mut self, sensors: &mut impl SensorPort) {
        match sensors.read_temperature() {
            Ok(t) => self.temperature_tenths = t,
            Err(e) => warn!("temperature sample failed: {}", e),
        }
        match sensors.read_light() {
            Ok(lux) => self.light_lux = lux,
            Err(e) => warn!("light sample failed: {}", e),
        }
        match sensors.read_acceleration() {
            Ok(a) => self.acceleration = a,
            Err(e) => warn!("accelerometer sample failed: {}", e),
        }
    }
}
