//! Hardware driver implementations
//!
//! This crate drives banks of I/O expanders through the bus traits in
//! `pinbank-hal`, using the registry and port state from `pinbank-core`:
//!
//! - MCP23017 port binding and flushing
//! - Pin controller (set, toggle, batch, bulk, aliases)
//! - Self test sequence
//! - Scoped shutdown to the all-off state

#![no_std]
#![deny(unsafe_code)]

pub mod mcp23017;

#[cfg(test)]
mod testing;

pub use mcp23017::{ControllerError, Enable, PinController, PortBus, SelfTestTiming};
