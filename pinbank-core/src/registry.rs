//! Logical pin registry
//!
//! Maps the flat, 1-based pin numbers callers use onto (port, bit index)
//! pairs. Ports live in an arena and pins refer to them by [`PortId`], so
//! every pin of a port shares that port's buffer without holding a
//! reference to it.
//!
//! Pin numbers are handed out in registration order and never reused. An
//! alias table sits in front of every lookup and substitutes a real pin for
//! a virtual one exactly once.

use heapless::{FnvIndexMap, Vec};

use crate::buffer::{BitIndex, PORT_WIDTH};
use crate::error::PinError;
use crate::port::{Port, PortAddress};

/// Pin number as seen by callers (1-based)
pub type LogicalPin = u16;

/// Maximum registered ports (eight MCP23017s)
pub const MAX_PORTS: usize = 16;

/// Maximum registered pins
pub const MAX_PINS: usize = MAX_PORTS * PORT_WIDTH;

/// Maximum aliases (must be a power of two)
pub const MAX_ALIASES: usize = 64;

/// Index of a port in the registry's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortId(u8);

impl PortId {
    /// Arena index
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where one logical pin lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSlot {
    /// Owning port
    pub port: PortId,
    /// Position in the port's buffer
    pub index: BitIndex,
}

/// Table of ports, pins and aliases
#[derive(Debug, Default)]
pub struct PinRegistry {
    ports: Vec<Port, MAX_PORTS>,
    /// Pin `n` is stored at `pins[n - 1]`; the length is the pin counter
    pins: Vec<PinSlot, MAX_PINS>,
    aliases: FnvIndexMap<LogicalPin, LogicalPin, MAX_ALIASES>,
}

impl PinRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a port and allocate `width` fresh pins on it
    ///
    /// The pins get bit indices `-1, -2, ..` in allocation order. Nothing is
    /// allocated on error.
    pub fn register_group(&mut self, address: PortAddress, width: u8) -> Result<PortId, PinError> {
        self.check_group(width)?;

        let id = PortId(self.ports.len() as u8);
        self.ports
            .push(Port::new(address, width))
            .map_err(|_| PinError::RegistryFull)?;

        for index in (0..width).filter_map(BitIndex::for_registration_order) {
            self.pins
                .push(PinSlot { port: id, index })
                .map_err(|_| PinError::RegistryFull)?;
        }

        Ok(id)
    }

    /// Register both ports of an MCP23017 (16 pins, port A first)
    ///
    /// Registers the whole chip or nothing.
    pub fn register_chip(&mut self, device: u8) -> Result<[PortId; 2], PinError> {
        self.check_room(2, 2 * PORT_WIDTH)?;

        let a = self.register_group(PortAddress::mcp23017_a(device), PORT_WIDTH as u8)?;
        let b = self.register_group(PortAddress::mcp23017_b(device), PORT_WIDTH as u8)?;
        Ok([a, b])
    }

    /// Check that a group of `width` pins could be registered now
    ///
    /// Lets a caller configure the hardware before committing pin numbers.
    pub fn check_group(&self, width: u8) -> Result<(), PinError> {
        if width == 0 || width as usize > PORT_WIDTH {
            return Err(PinError::InvalidWidth(width));
        }
        self.check_room(1, width as usize)
    }

    /// Check that `ports` more ports holding `pins` more pins would fit
    pub fn check_room(&self, ports: usize, pins: usize) -> Result<(), PinError> {
        if self.ports.len() + ports <= MAX_PORTS && self.pins.len() + pins <= MAX_PINS {
            Ok(())
        } else {
            Err(PinError::RegistryFull)
        }
    }

    /// Apply the alias table, then look the pin up
    pub fn resolve(&self, pin: LogicalPin) -> Result<PinSlot, PinError> {
        let real = self.aliases.get(&pin).copied().unwrap_or(pin);
        self.slot(real)
    }

    /// Look up a real pin, ignoring aliases
    pub fn slot(&self, pin: LogicalPin) -> Result<PinSlot, PinError> {
        (pin as usize)
            .checked_sub(1)
            .and_then(|i| self.pins.get(i))
            .copied()
            .ok_or(PinError::UnknownPin(pin))
    }

    /// Make `virtual_pin` stand for `pin`
    ///
    /// Replaces any earlier alias for `virtual_pin`. The target is not
    /// checked until the alias is used.
    pub fn alias(&mut self, virtual_pin: LogicalPin, pin: LogicalPin) -> Result<(), PinError> {
        self.aliases
            .insert(virtual_pin, pin)
            .map(|_| ())
            .map_err(|_| PinError::AliasTableFull)
    }

    /// Remove one alias, returning its target
    pub fn unalias(&mut self, virtual_pin: LogicalPin) -> Option<LogicalPin> {
        self.aliases.remove(&virtual_pin)
    }

    /// Remove every alias
    pub fn clear_aliases(&mut self) {
        self.aliases.clear();
    }

    /// Target of an alias, if one is set
    pub fn alias_target(&self, virtual_pin: LogicalPin) -> Option<LogicalPin> {
        self.aliases.get(&virtual_pin).copied()
    }

    /// Write one cached bit
    ///
    /// Fails with `UnknownPort` for a slot this registry did not hand out.
    pub fn write_slot(&mut self, slot: PinSlot, on: bool) -> Result<(), PinError> {
        let port = self
            .ports
            .get_mut(slot.port.index())
            .ok_or(PinError::UnknownPort(slot.port))?;
        port.buffer_mut().set(slot.index, on);
        Ok(())
    }

    /// Read one cached bit
    pub fn read_slot(&self, slot: PinSlot) -> Result<bool, PinError> {
        self.port(slot.port)
            .map(|port| port.buffer().get(slot.index))
            .ok_or(PinError::UnknownPort(slot.port))
    }

    /// Cached state of a pin (aliases applied)
    pub fn is_on(&self, pin: LogicalPin) -> Result<bool, PinError> {
        self.read_slot(self.resolve(pin)?)
    }

    /// Set the cached state of every registered pin
    pub fn write_all(&mut self, on: bool) {
        for slot in &self.pins {
            if let Some(port) = self.ports.get_mut(slot.port.index()) {
                port.buffer_mut().set(slot.index, on);
            }
        }
    }

    /// Number of pins allocated so far
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Number of registered ports
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Registered pin numbers in allocation order
    pub fn pins(&self) -> impl Iterator<Item = LogicalPin> {
        1..=self.pins.len() as LogicalPin
    }

    /// Port by id
    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id.index())
    }

    /// Registered ports in registration order
    pub fn ports(&self) -> impl Iterator<Item = (PortId, &Port)> {
        self.ports
            .iter()
            .enumerate()
            .map(|(i, port)| (PortId(i as u8), port))
    }
}
