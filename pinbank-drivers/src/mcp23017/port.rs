//! Port binding

use pinbank_core::{Port, PortAddress};
use pinbank_hal::{I2cBus, RegisterWriter};

/// Write side of one registered port
///
/// Holds the writers bound at registration. The port's cached state stays
/// in the registry; [`PortBus::flush`] encodes it and writes the latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortBus {
    direction: RegisterWriter,
    latch: RegisterWriter,
}

impl PortBus {
    /// Bind writers for a port without touching the bus
    pub const fn new(address: PortAddress) -> Self {
        Self {
            direction: RegisterWriter::new(address.device, address.direction),
            latch: RegisterWriter::new(address.device, address.latch),
        }
    }

    /// Make every line an output and drive it low
    ///
    /// Done once, at registration.
    pub fn configure<B: I2cBus>(&self, bus: &mut B) -> Result<(), B::Error> {
        self.direction.write(bus, 0x00)?;
        self.latch.write(bus, 0x00)
    }

    /// Write the port's cached state to its output latch
    pub fn flush<B: I2cBus>(&self, bus: &mut B, port: &Port) -> Result<(), B::Error> {
        self.latch.write(bus, port.encode())
    }

    /// Output latch writer
    pub const fn latch(&self) -> RegisterWriter {
        self.latch
    }
}
