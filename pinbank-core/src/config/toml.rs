//! TOML bank configuration
//!
//! ```toml
//! [[chips]]
//! address = 0x20
//!
//! [[port_groups]]
//! address = 0x24
//! direction = 0x00
//! latch = 0x14
//! width = 4
//!
//! [[aliases]]
//! virtual = 100
//! pin = 3
//! ```

use core::fmt;

use crate::error::PinError;

use super::types::BankConfig;

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Not valid TOML, or not the expected shape
    Parse(::toml::de::Error),
    /// Well formed but cannot be applied
    Invalid(PinError),
}

impl From<PinError> for ConfigError {
    fn from(e: PinError) -> Self {
        ConfigError::Invalid(e)
    }
}

impl From<::toml::de::Error> for ConfigError {
    fn from(e: ::toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "{}", e),
            ConfigError::Invalid(e) => write!(f, "invalid bank layout: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::Parse(_) => defmt::write!(f, "Parse"),
            ConfigError::Invalid(e) => defmt::write!(f, "Invalid({})", e),
        }
    }
}

/// Parse and validate a bank config
pub fn parse_toml(text: &str) -> Result<BankConfig, ConfigError> {
    let config: BankConfig = ::toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}
