//! Serial status link (UART1, 8N1).

use crate::drivers::hw_init;
use crate::error::CommsError;

/// Writes go through the UART driver installed by `hw_init::init_peripherals`.
#[derive(Default)]
pub struct SerialLink;

impl SerialLink {
    pub const fn new() -> Self {
        Self
    }

    /// Queue `bytes` for transmission. A short or failed write is an error.
    pub fn send(&mut self, bytes: &[u8]) -> Result<(), CommsError> {
        match hw_init::uart_write(bytes) {
            Some(n) if n == bytes.len() => Ok(()),
            _ => Err(CommsError::UartWriteFailed),
        }
    }
}
