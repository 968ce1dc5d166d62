//! Bus-independent core of the expander controller
//!
//! This crate holds everything about an expander bank that does not touch
//! the bus:
//!
//! - Port bit buffers and their byte encoding
//! - The logical pin registry and alias table
//! - Write coalescing (which ports a batch has to flush)
//! - Bank configuration types
//!
//! Bus writes live in `pinbank-drivers`.

#![no_std]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod flush;
pub mod port;
pub mod registry;

pub use buffer::{BitBuffer, BitIndex, PORT_WIDTH};
pub use error::PinError;
pub use flush::FlushPlan;
pub use port::{Port, PortAddress};
pub use registry::{LogicalPin, PinRegistry, PinSlot, PortId, MAX_ALIASES, MAX_PINS, MAX_PORTS};
