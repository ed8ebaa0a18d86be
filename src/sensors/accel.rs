//! MMA7455 3-axis accelerometer (I²C, address 0x1D).
//!
//! Configured for ±2 g measurement mode; the 8-bit output registers give
//! one signed byte per axis (64 counts ≈ 1 g).

use embedded_hal::i2c::I2c;

use super::Acceleration;
use crate::error::SensorError;

pub const MMA7455_ADDR: u8 = 0x1D;

const REG_XOUT8: u8 = 0x06;
const REG_MCTL: u8 = 0x16;

/// Measurement mode, 2 g range.
const MCTL_MEASURE_2G: u8 = 0x05;

#[derive(Debug, Default)]
pub struct Mma7455;

impl Mma7455 {
    pub const fn new() -> Self {
        Self
    }

    pub fn init<I: I2c>(&self, bus: &mut I) -> Result<(), SensorError> {
        bus.write(MMA7455_ADDR, &[REG_MCTL, MCTL_MEASURE_2G])
            .map_err(|_| SensorError::BusFailed)
    }

    pub fn read<I: I2c>(&self, bus: &mut I) -> Result<Acceleration, SensorError> {
        let mut buf = [0u8; 3];
        bus.write_read(MMA7455_ADDR, &[REG_XOUT8], &mut buf)
            .map_err(|_| SensorError::BusFailed)?;
        Ok(Acceleration::new(buf[0] as i8, buf[1] as i8, buf[2] as i8))
    }
}
