//! Bank configuration
//!
//! Describes which expanders to register and which aliases to install, so a
//! board's layout can live in a config file instead of code.

#[cfg(feature = "toml")]
mod toml;
pub mod types;

#[cfg(feature = "toml")]
pub use self::toml::{parse_toml, ConfigError};
pub use types::*;
