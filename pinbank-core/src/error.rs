//! Pin addressing errors

use crate::registry::{LogicalPin, PortId};

/// Errors from pin lookup, batching and registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin (after alias substitution) was never registered
    UnknownPin(LogicalPin),
    /// Per-pin enable list does not match the pin list
    LengthMismatch {
        /// Number of pins given
        pins: usize,
        /// Number of enable values given
        values: usize,
    },
    /// Port group width outside 1..=8
    InvalidWidth(u8),
    /// Slot names a port this registry does not hold
    UnknownPort(PortId),
    /// Port arena or pin table is full
    RegistryFull,
    /// Alias table is full
    AliasTableFull,
}
