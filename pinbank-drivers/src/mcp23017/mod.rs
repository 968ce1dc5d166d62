//! MCP23017 output banks
//!
//! Each chip contributes two 8-line ports. Every port is configured as all
//! outputs, all off, when it is registered; after that only its output
//! latch is written.
//!
//! # Write pattern
//!
//! | Step         | Register        | Value               |
//! |--------------|-----------------|---------------------|
//! | Registration | IODIRA / IODIRB | `0x00` (outputs)    |
//! | Registration | OLATA / OLATB   | `0x00` (all off)    |
//! | Flush        | OLATA / OLATB   | encoded port buffer |

mod controller;
mod port;
mod self_test;

pub use controller::{Enable, PinController};
pub use port::PortBus;
pub use self_test::SelfTestTiming;

use pinbank_core::PinError;

/// Controller errors
///
/// Transport errors are passed through untouched. Nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError<E> {
    /// Pin lookup, batching or registration rejected the request
    Pin(PinError),
    /// The bus write failed
    Transport(E),
}

impl<E> From<PinError> for ControllerError<E> {
    fn from(e: PinError) -> Self {
        ControllerError::Pin(e)
    }
}
