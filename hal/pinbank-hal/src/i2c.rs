//! I2C bus abstractions
//!
//! Provides the bus master trait the expander controller talks through,
//! plus a writer bound to a single (device, register) pair.

/// I2C bus master
///
/// Output expanders are only ever written, so the trait carries writes
/// alone.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Write one byte to a device register
    ///
    /// One blocking transaction: register address followed by the value.
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[register, value])
    }
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }

    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write_register(address, register, value)
    }
}

/// Write primitive bound to a fixed device register
///
/// Holds only the address pair; the bus is supplied on each write so the
/// bus itself can stay exclusively owned by one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWriter {
    address: u8,
    register: u8,
}

impl RegisterWriter {
    /// Bind a writer to `register` on the device at `address`
    pub const fn new(address: u8, register: u8) -> Self {
        Self { address, register }
    }

    /// 7-bit device address
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Register this writer targets
    pub const fn register(&self) -> u8 {
        self.register
    }

    /// Write `value` to the bound register
    pub fn write<B: I2cBus + ?Sized>(&self, bus: &mut B, value: u8) -> Result<(), B::Error> {
        bus.write_register(self.address, self.register, value)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz), the MCP23017 upper limit is 1.7 MHz
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}
