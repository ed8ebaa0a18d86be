//! ISL29003 ambient-light sensor (I²C, address 0x44).
//!
//! Runs continuously in the 1000 lux range with 16-bit resolution. The
//! interrupt output goes low when the reading leaves the window set by the
//! low/high threshold registers; the GPIO edge is handled by the light ISR
//! and the latched flag is cleared here from the main loop.
//!
//! | Reg  | Name     | Use                                |
//! |------|----------|------------------------------------|
//! | 0x00 | COMMAND  | enable, mode, resolution           |
//! | 0x01 | CONTROL  | range, persist, interrupt flag b5  |
//! | 0x02 | INT_HI   | upper threshold (MSB of 16-bit)    |
//! | 0x03 | INT_LO   | lower threshold (MSB of 16-bit)    |
//! | 0x04 | DATA_LSB |                                    |
//! | 0x05 | DATA_MSB |                                    |

use embedded_hal::i2c::I2c;

use crate::error::SensorError;

pub const ISL29003_ADDR: u8 = 0x44;

const REG_COMMAND: u8 = 0x00;
const REG_CONTROL: u8 = 0x01;
const REG_INT_HI: u8 = 0x02;
const REG_INT_LO: u8 = 0x03;
const REG_DATA_LSB: u8 = 0x04;

const CMD_ENABLE: u8 = 0x80;
/// Range 1000 lux, interrupt after one out-of-window cycle.
const CTRL_RANGE_1000_PERSIST_1: u8 = 0x00;
const CTRL_INT_FLAG: u8 = 0x20;

const RANGE_LUX: u32 = 1000;

/// Stateless register-level driver; the bus is passed per call so the
/// accelerometer and LED bar can share it.
#[derive(Debug, Default)]
pub struct Isl29003;

impl Isl29003 {
    pub const fn new() -> Self {
        Self
    }

    /// Enable continuous sampling and program both thresholds.
    pub fn init<I: I2c>(&self, bus: &mut I, low_lux: u32, high_lux: u32) -> Result<(), SensorError> {
        write_reg(bus, REG_CONTROL, CTRL_RANGE_1000_PERSIST_1)?;
        self.set_low_threshold(bus, low_lux)?;
        self.set_high_threshold(bus, high_lux)?;
        self.clear_interrupt(bus)?;
        write_reg(bus, REG_COMMAND, CMD_ENABLE)
    }

    pub fn read_lux<I: I2c>(&self, bus: &mut I) -> Result<u32, SensorError> {
        let mut buf = [0u8; 2];
        bus.write_read(ISL29003_ADDR, &[REG_DATA_LSB], &mut buf)
            .map_err(|_| SensorError::BusFailed)?;
        let counts = u32::from(u16::from_le_bytes(buf));
        Ok(counts * RANGE_LUX / 65_536)
    }

    pub fn set_low_threshold<I: I2c>(&self, bus: &mut I, lux: u32) -> Result<(), SensorError> {
        write_reg(bus, REG_INT_LO, lux_to_threshold(lux))
    }

    pub fn set_high_threshold<I: I2c>(&self, bus: &mut I, lux: u32) -> Result<(), SensorError> {
        write_reg(bus, REG_INT_HI, lux_to_threshold(lux))
    }

    /// Clear the latched interrupt flag so the next crossing fires again.
    pub fn clear_interrupt<I: I2c>(&self, bus: &mut I) -> Result<(), SensorError> {
        let mut ctrl = [0u8; 1];
        bus.write_read(ISL29003_ADDR, &[REG_CONTROL], &mut ctrl)
            .map_err(|_| SensorError::BusFailed)?;
        write_reg(bus, REG_CONTROL, ctrl[0] & !CTRL_INT_FLAG)
    }
}

/// Threshold registers hold the upper byte of the 16-bit count.
pub fn lux_to_threshold(lux: u32) -> u8 {
    let counts = lux.min(RANGE_LUX) * 65_536 / RANGE_LUX;
    (counts >> 8).min(255) as u8
}

fn write_reg<I: I2c>(bus: &mut I, reg: u8, value: u8) -> Result<(), SensorError> {
    bus.write(ISL29003_ADDR, &[reg, value])
        .map_err(|_| SensorError::BusFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::fake_bus::FakeBus;

    #[test]
    fn threshold_encoding() {
        assert_eq!(lux_to_threshold(0), 0);
        assert_eq!(lux_to_threshold(50), 12);
        assert_eq!(lux_to_threshold(972), 248);
        assert_eq!(lux_to_threshold(5000), 255);
    }

    #[test]
    fn init_programs_window_and_enables() {
        let mut bus = FakeBus::new(ISL29003_ADDR);
        Isl29003::new().init(&mut bus, 50, 972).unwrap();
        assert_eq!(bus.reg(REG_INT_LO), 12);
        assert_eq!(bus.reg(REG_INT_HI), 248);
        assert_eq!(bus.reg(REG_COMMAND), CMD_ENABLE);
    }

    #[test]
    fn reads_lux_from_data_registers() {
        let mut bus = FakeBus::new(ISL29003_ADDR);
        // 0x8000 counts = half range
        bus.set_reg(REG_DATA_LSB, 0x00);
        bus.set_reg(REG_DATA_LSB + 1, 0x80);
        assert_eq!(Isl29003::new().read_lux(&mut bus), Ok(500));
    }

    #[test]
    fn clear_interrupt_drops_only_flag_bit() {
        let mut bus = FakeBus::new(ISL29003_ADDR);
        bus.set_reg(REG_CONTROL, CTRL_INT_FLAG | 0x03);
        Isl29003::new().clear_interrupt(&mut bus).unwrap();
        assert_eq!(bus.reg(REG_CONTROL), 0x03);
    }

    #[test]
    fn bus_error_maps_to_sensor_error() {
        let mut bus = FakeBus::new(0x10); // nothing at 0x44
        assert_eq!(Isl29003::new().read_lux(&mut bus), Err(SensorError::BusFailed));
    }
}
