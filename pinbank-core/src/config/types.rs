//! Configuration type definitions

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::PORT_WIDTH;
use crate::error::PinError;
use crate::port::PortAddress;
use crate::registry::{LogicalPin, PinRegistry, MAX_ALIASES, MAX_PORTS};

/// Maximum chips per config
pub const MAX_CHIPS: usize = MAX_PORTS / 2;

/// Maximum raw port groups per config
pub const MAX_GROUPS: usize = MAX_PORTS;

/// One MCP23017 (both ports)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChipConfig {
    /// 7-bit I2C address (0x20-0x27)
    pub address: u8,
}

/// A single port given by its register pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PortGroupConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Direction register
    pub direction: u8,
    /// Output latch register
    pub latch: u8,
    /// Pins to allocate (1-8)
    #[cfg_attr(feature = "serde", serde(default = "default_width"))]
    pub width: u8,
}

#[cfg(feature = "serde")]
fn default_width() -> u8 {
    PORT_WIDTH as u8
}

impl PortGroupConfig {
    /// Bus location of the group
    pub const fn port_address(&self) -> PortAddress {
        PortAddress::new(self.address, self.direction, self.latch)
    }
}

/// Virtual pin number standing for a real one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AliasConfig {
    /// Number callers use
    #[cfg_attr(feature = "serde", serde(rename = "virtual"))]
    pub virtual_pin: LogicalPin,
    /// Registered pin it resolves to
    pub pin: LogicalPin,
}

/// Complete bank layout
///
/// Chips are registered first, in order, then port groups. Pin numbers
/// follow from that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BankConfig {
    /// MCP23017 chips
    #[cfg_attr(feature = "serde", serde(default))]
    pub chips: Vec<ChipConfig, MAX_CHIPS>,
    /// Raw port groups
    #[cfg_attr(feature = "serde", serde(default))]
    pub port_groups: Vec<PortGroupConfig, MAX_GROUPS>,
    /// Pin aliases
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<AliasConfig, MAX_ALIASES>,
}

impl BankConfig {
    /// Collect a config from static tables, such as ones generated at
    /// build time
    pub fn from_tables(
        chips: &[ChipConfig],
        port_groups: &[PortGroupConfig],
        aliases: &[AliasConfig],
    ) -> Result<Self, PinError> {
        Ok(Self {
            chips: Vec::from_slice(chips).map_err(|_| PinError::RegistryFull)?,
            port_groups: Vec::from_slice(port_groups).map_err(|_| PinError::RegistryFull)?,
            aliases: Vec::from_slice(aliases).map_err(|_| PinError::AliasTableFull)?,
        })
    }

    /// Build the registry this config describes, without touching a bus
    ///
    /// Unlike runtime aliases, every alias target must exist.
    pub fn build_registry(&self) -> Result<PinRegistry, PinError> {
        let mut registry = PinRegistry::new();
        for chip in &self.chips {
            registry.register_chip(chip.address)?;
        }
        for group in &self.port_groups {
            registry.register_group(group.port_address(), group.width)?;
        }
        for alias in &self.aliases {
            registry.slot(alias.pin)?;
            registry.alias(alias.virtual_pin, alias.pin)?;
        }
        Ok(registry)
    }

    /// Check that the config can be applied
    pub fn validate(&self) -> Result<(), PinError> {
        self.build_registry().map(|_| ())
    }

    /// Number of pins the config allocates
    pub fn pin_count(&self) -> usize {
        self.chips.len() * 2 * PORT_WIDTH
            + self
                .port_groups
                .iter()
                .map(|group| group.width as usize)
                .sum::<usize>()
    }
}
