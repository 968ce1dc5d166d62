//! Pinbank Hardware Abstraction Layer
//!
//! This crate defines the bus traits the expander controller is written
//! against. Any I2C master can drive the controller once it implements
//! [`I2cBus`], either directly or through [`EmbeddedHalBus`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (pinbank-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinbank-drivers (PinController)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinbank-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal I2C (embassy-rp, mocks)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`i2c::RegisterWriter`] - Writer bound to one device register

#![no_std]
#![deny(unsafe_code)]

pub mod eh;
pub mod i2c;

// Re-export key types at crate root for convenience
pub use eh::EmbeddedHalBus;
pub use i2c::{I2cBus, I2cConfig, RegisterWriter};
