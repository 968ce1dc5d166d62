//! `embedded-hal` adapter
//!
//! Wraps any `embedded_hal::i2c::I2c` implementation so it can be used as
//! an [`I2cBus`].

use embedded_hal::i2c::I2c;

use crate::i2c::I2cBus;

/// [`I2cBus`] over an `embedded-hal` 1.0 I2C master
#[derive(Debug)]
pub struct EmbeddedHalBus<T> {
    inner: T,
}

impl<T: I2c> EmbeddedHalBus<T> {
    /// Wrap an I2C master
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Access the wrapped I2C master
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Return the wrapped I2C master
    pub fn release(self) -> T {
        self.inner
    }
}

impl<T: I2c> I2cBus for EmbeddedHalBus<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(address, data)
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::vec;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn test_write_register_is_one_transaction() {
        let expectations = [
            I2cTransaction::write(0x20, vec![0x00, 0x00]),
            I2cTransaction::write(0x20, vec![0x14, 0x81]),
        ];
        let mut bus = EmbeddedHalBus::new(I2cMock::new(&expectations));

        bus.write_register(0x20, 0x00, 0x00).unwrap();
        bus.write_register(0x20, 0x14, 0x81).unwrap();

        bus.release().done();
    }

    #[test]
    fn test_transport_error_is_surfaced() {
        let expectations =
            [I2cTransaction::write(0x27, vec![0x15, 0x01]).with_error(ErrorKind::Other)];
        let mut bus = EmbeddedHalBus::new(I2cMock::new(&expectations));

        let result = bus.write_register(0x27, 0x15, 0x01);
        assert_eq!(result, Err(ErrorKind::Other));

        bus.release().done();
    }

    #[test]
    fn test_sequential_write_passes_through() {
        // OLATA then OLATB with sequential addressing
        let expectations = [I2cTransaction::write(0x21, vec![0x14, 0x0F, 0xF0])];
        let mut bus = EmbeddedHalBus::new(I2cMock::new(&expectations));

        bus.write(0x21, &[0x14, 0x0F, 0xF0]).unwrap();

        bus.inner_mut().done();
    }
}
