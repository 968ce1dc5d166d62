//! Pin controller
//!
//! The public face of an expander bank. Callers address pins by number; the
//! controller resolves aliases, updates the cached port buffers and decides
//! when to write them out.
//!
//! Single-pin calls flush immediately. Batch calls mutate every buffer
//! first and then flush each touched port once, in the order the ports were
//! first touched. Batches are not atomic across ports: if a write fails,
//! ports flushed before it keep their new state.

use heapless::Vec;

use pinbank_core::config::BankConfig;
use pinbank_core::{
    FlushPlan, LogicalPin, PinError, PinRegistry, PinSlot, PortAddress, PortId, MAX_PORTS,
    PORT_WIDTH,
};
use pinbank_hal::I2cBus;

use super::port::PortBus;
use super::ControllerError;

/// Enable values for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enable<'a> {
    /// Same state for every pin
    All(bool),
    /// One state per pin, same length as the pin list
    Each(&'a [bool]),
}

impl Enable<'_> {
    fn get(&self, i: usize) -> bool {
        match self {
            Enable::All(on) => *on,
            Enable::Each(values) => values[i],
        }
    }
}

impl From<bool> for Enable<'_> {
    fn from(on: bool) -> Self {
        Enable::All(on)
    }
}

impl<'a> From<&'a [bool]> for Enable<'a> {
    fn from(values: &'a [bool]) -> Self {
        Enable::Each(values)
    }
}

impl<'a, const N: usize> From<&'a [bool; N]> for Enable<'a> {
    fn from(values: &'a [bool; N]) -> Self {
        Enable::Each(values)
    }
}

/// Flat-numbered output pins over a bank of expanders
///
/// Owns the bus, the pin registry and one [`PortBus`] per registered port
/// (indexed by [`PortId`], parallel to the registry's port arena).
pub struct PinController<B> {
    bus: B,
    registry: PinRegistry,
    ports: Vec<PortBus, MAX_PORTS>,
}

impl<B: I2cBus> PinController<B> {
    /// Create a controller with no chips registered
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            registry: PinRegistry::new(),
            ports: Vec::new(),
        }
    }

    /// Run `body` against a fresh controller, then turn every pin off
    ///
    /// The shutdown runs whether `body` succeeded or not. An error from
    /// `body` is reported in preference to a shutdown error.
    pub fn scoped<T, F>(bus: B, body: F) -> Result<T, ControllerError<B::Error>>
    where
        F: FnOnce(&mut Self) -> Result<T, ControllerError<B::Error>>,
    {
        let mut controller = Self::new(bus);
        let result = body(&mut controller);
        let shutdown = controller.turn_off();

        if shutdown.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Scoped shutdown failed to clear all ports");
        }

        match (result, shutdown) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
            (Ok(value), Ok(())) => Ok(value),
        }
    }

    /// Turn every pin off and release the bus
    pub fn shutdown(mut self) -> Result<B, ControllerError<B::Error>> {
        self.turn_off()?;
        Ok(self.bus)
    }

    /// Register both ports of an MCP23017 (16 pins, port A first)
    ///
    /// No duplicate detection: registering an address twice gives two
    /// independent sets of pins driving the same chip. Capacity for both
    /// ports is checked up front. If port B fails to configure, port A
    /// stays registered.
    pub fn register_chip(&mut self, address: u8) -> Result<[PortId; 2], ControllerError<B::Error>> {
        self.registry.check_room(2, 2 * PORT_WIDTH)?;
        let a = self.attach(PortAddress::mcp23017_a(address), PORT_WIDTH as u8)?;
        let b = self.attach(PortAddress::mcp23017_b(address), PORT_WIDTH as u8)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "MCP23017 at {=u8:#x}: pins {} of {}",
            address,
            self.registry.pin_count() - 2 * PORT_WIDTH + 1,
            self.registry.pin_count()
        );

        Ok([a, b])
    }

    /// Register one port by its register pair, allocating `width` pins (1-8)
    pub fn register_port_group(
        &mut self,
        address: u8,
        direction: u8,
        latch: u8,
        width: u8,
    ) -> Result<PortId, ControllerError<B::Error>> {
        let id = self.attach(PortAddress::new(address, direction, latch), width)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Port group at {=u8:#x} (dir {=u8:#x}, latch {=u8:#x}): {} pins",
            address,
            direction,
            latch,
            width
        );

        Ok(id)
    }

    /// Register a port group of the full port width
    pub fn register_port(
        &mut self,
        address: u8,
        direction: u8,
        latch: u8,
    ) -> Result<PortId, ControllerError<B::Error>> {
        self.register_port_group(address, direction, latch, PORT_WIDTH as u8)
    }

    /// Configure a port as all outputs, all off, then number its pins
    ///
    /// Pins exist only once their port is configured. A failed write
    /// allocates nothing.
    fn attach(&mut self, address: PortAddress, width: u8) -> Result<PortId, ControllerError<B::Error>> {
        self.registry.check_group(width)?;

        let port_bus = PortBus::new(address);
        port_bus
            .configure(&mut self.bus)
            .map_err(ControllerError::Transport)?;

        let id = self.registry.register_group(address, width)?;
        self.ports
            .push(port_bus)
            .map_err(|_| PinError::RegistryFull)?;
        Ok(id)
    }

    /// Register every chip, port group and alias in a config
    pub fn apply_config(&mut self, config: &BankConfig) -> Result<(), ControllerError<B::Error>> {
        for chip in &config.chips {
            self.register_chip(chip.address)?;
        }
        for group in &config.port_groups {
            self.register_port_group(group.address, group.direction, group.latch, group.width)?;
        }
        for alias in &config.aliases {
            self.alias(alias.virtual_pin, alias.pin)?;
        }
        Ok(())
    }

    /// Turn a pin on or off and write its port
    pub fn set_pin(&mut self, pin: LogicalPin, enable: bool) -> Result<(), ControllerError<B::Error>> {
        let port = self.set_pin_deferred(pin, enable)?;
        self.flush_port(port)
    }

    /// Update a pin's cached state without writing the bus
    ///
    /// Returns the port that now needs a flush.
    pub fn set_pin_deferred(
        &mut self,
        pin: LogicalPin,
        enable: bool,
    ) -> Result<PortId, ControllerError<B::Error>> {
        let slot = self.registry.resolve(pin)?;
        self.registry.write_slot(slot, enable)?;
        Ok(slot.port)
    }

    /// Set many pins, writing each touched port once
    ///
    /// Nothing is changed or written if the enable list has the wrong
    /// length or any pin is unknown.
    pub fn set_pins<'a>(
        &mut self,
        pins: &[LogicalPin],
        enable: impl Into<Enable<'a>>,
    ) -> Result<(), ControllerError<B::Error>> {
        let enable = enable.into();
        if let Enable::Each(values) = enable {
            if values.len() != pins.len() {
                return Err(PinError::LengthMismatch {
                    pins: pins.len(),
                    values: values.len(),
                }
                .into());
            }
        }
        for &pin in pins {
            self.registry.resolve(pin)?;
        }

        let mut plan = FlushPlan::new();
        for (i, &pin) in pins.iter().enumerate() {
            plan.touch(self.set_pin_deferred(pin, enable.get(i))?);
        }
        self.flush(&plan)
    }

    /// Invert a pin and write its port, returning the new state
    pub fn toggle(&mut self, pin: LogicalPin) -> Result<bool, ControllerError<B::Error>> {
        let slot = self.registry.resolve(pin)?;
        let on = !self.registry.read_slot(slot)?;
        self.write_slot(slot, on)?;
        Ok(on)
    }

    /// Turn every registered pin on, one write per port
    pub fn turn_on(&mut self) -> Result<(), ControllerError<B::Error>> {
        self.set_all(true)
    }

    /// Turn every registered pin off, one write per port
    pub fn turn_off(&mut self) -> Result<(), ControllerError<B::Error>> {
        self.set_all(false)
    }

    fn set_all(&mut self, on: bool) -> Result<(), ControllerError<B::Error>> {
        self.registry.write_all(on);
        let plan = FlushPlan::all(&self.registry);
        self.flush(&plan)
    }

    /// Write one real pin and flush its port
    pub(crate) fn write_slot(&mut self, slot: PinSlot, on: bool) -> Result<(), ControllerError<B::Error>> {
        self.registry.write_slot(slot, on)?;
        self.flush_port(slot.port)
    }

    /// Write one port's cached state to the bus
    pub fn flush_port(&mut self, id: PortId) -> Result<(), ControllerError<B::Error>> {
        let port = self.registry.port(id).ok_or(PinError::UnknownPort(id))?;
        let port_bus = self.ports.get(id.index()).ok_or(PinError::UnknownPort(id))?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "Flush port {} -> {=u8:#b}",
            id.index(),
            port.encode()
        );

        port_bus
            .flush(&mut self.bus, port)
            .map_err(ControllerError::Transport)
    }

    fn flush(&mut self, plan: &FlushPlan) -> Result<(), ControllerError<B::Error>> {
        for id in plan.iter() {
            self.flush_port(id)?;
        }
        Ok(())
    }

    /// Make `virtual_pin` stand for `pin` in every later call
    pub fn alias(&mut self, virtual_pin: LogicalPin, pin: LogicalPin) -> Result<(), ControllerError<B::Error>> {
        self.registry.alias(virtual_pin, pin)?;
        Ok(())
    }

    /// Remove one alias
    pub fn unalias(&mut self, virtual_pin: LogicalPin) -> Option<LogicalPin> {
        self.registry.unalias(virtual_pin)
    }

    /// Remove every alias
    pub fn clear_aliases(&mut self) {
        self.registry.clear_aliases();
    }

    /// Cached state of a pin
    pub fn is_on(&self, pin: LogicalPin) -> Result<bool, ControllerError<B::Error>> {
        Ok(self.registry.is_on(pin)?)
    }

    /// Number of registered pins
    pub fn pin_count(&self) -> usize {
        self.registry.pin_count()
    }

    /// Read-only view of the registry
    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    /// The underlying bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}
