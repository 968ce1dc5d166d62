//! Expander ports
//!
//! A port is one 8-bit I/O register pair of an expander: a direction
//! register and an output latch. Two ports make up one MCP23017.

use crate::buffer::BitBuffer;

/// MCP23017 register addresses (IOCON.BANK = 0)
pub mod reg {
    /// Port A direction (1 = input, 0 = output)
    pub const IODIRA: u8 = 0x00;
    /// Port B direction
    pub const IODIRB: u8 = 0x01;
    /// Port A output latch
    pub const OLATA: u8 = 0x14;
    /// Port B output latch
    pub const OLATB: u8 = 0x15;
}

/// Where a port lives on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortAddress {
    /// 7-bit device address
    pub device: u8,
    /// Direction register
    pub direction: u8,
    /// Output latch register
    pub latch: u8,
}

impl PortAddress {
    /// Address an arbitrary register pair
    pub const fn new(device: u8, direction: u8, latch: u8) -> Self {
        Self {
            device,
            direction,
            latch,
        }
    }

    /// Port A of an MCP23017
    pub const fn mcp23017_a(device: u8) -> Self {
        Self::new(device, reg::IODIRA, reg::OLATA)
    }

    /// Port B of an MCP23017
    pub const fn mcp23017_b(device: u8) -> Self {
        Self::new(device, reg::IODIRB, reg::OLATB)
    }
}

/// One registered port and its cached output state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Port {
    address: PortAddress,
    width: u8,
    buffer: BitBuffer,
}

impl Port {
    pub(crate) const fn new(address: PortAddress, width: u8) -> Self {
        Self {
            address,
            width,
            buffer: BitBuffer::new(),
        }
    }

    /// Bus location of this port
    pub const fn address(&self) -> PortAddress {
        self.address
    }

    /// Number of logical pins bound to this port
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Cached output state
    pub const fn buffer(&self) -> &BitBuffer {
        &self.buffer
    }

    /// Mutable cached output state
    pub fn buffer_mut(&mut self) -> &mut BitBuffer {
        &mut self.buffer
    }

    /// Byte the output latch should hold
    pub fn encode(&self) -> u8 {
        self.buffer.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcp23017_register_pairs() {
        assert_eq!(
            PortAddress::mcp23017_a(0x20),
            PortAddress::new(0x20, 0x00, 0x14)
        );
        assert_eq!(
            PortAddress::mcp23017_b(0x20),
            PortAddress::new(0x20, 0x01, 0x15)
        );
    }

    #[test]
    fn test_new_port_is_off() {
        let port = Port::new(PortAddress::mcp23017_a(0x21), 8);
        assert_eq!(port.encode(), 0);
        assert_eq!(port.width(), 8);
        assert_eq!(port.address().device, 0x21);
    }
}
