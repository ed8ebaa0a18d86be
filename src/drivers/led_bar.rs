//! PCA9532 16-channel LED driver used as a 16-segment bar.
//!
//! Each LED takes two bits in one of four LED-selector registers
//! (`LS0`..`LS3`): `00` off, `01` on. The selector registers are written
//! in one burst using the auto-increment flag.

use embedded_hal::i2c::I2c;

use crate::error::CommsError;

pub const PCA9532_ADDR: u8 = 0x60;

const REG_LS0: u8 = 0x06;
const AUTO_INCREMENT: u8 = 0x10;
const LED_ON: u8 = 0b01;

/// Selector bytes for a 16-bit on/off pattern (bit n = LED n).
pub fn selector_bytes(pattern: u16) -> [u8; 4] {
    let mut ls = [0u8; 4];
    for led in 0..16 {
        if pattern & (1 << led) != 0 {
            ls[led / 4] |= LED_ON << ((led % 4) * 2);
        }
    }
    ls
}

pub struct Pca9532;

impl Pca9532 {
    pub fn set_leds<I: I2c>(&self, bus: &mut I, pattern: u16) -> Result<(), CommsError> {
        let ls = selector_bytes(pattern);
        let frame = [REG_LS0 | AUTO_INCREMENT, ls[0], ls[1], ls[2], ls[3]];
        bus.write(PCA9532_ADDR, &frame)
            .map_err(|_| CommsError::BusWriteFailed)
    }

    pub fn clear<I: I2c>(&self, bus: &mut I) -> Result<(), CommsError> {
        self.set_leds(bus, 0)
    }
}
