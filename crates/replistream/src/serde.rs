//! JSON‑deserializable stream configuration.
//!
//! These types describe the *shape* of a configuration file. Every field is
//! optional; missing values fall back to [`StreamConfig::default`].
//!
//! ```json
//! { "initial_byte_capacity": 64, "initial_bit_capacity": 1024 }
//! ```

use serde::{Deserialize, Serialize};

use crate::{config::StreamConfig, errors::ConfigError};

/// Initial stream buffer sizes.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StreamConfigDef {
    /// Bytes allocated up front by byte stream writers.
    #[serde(default)]
    pub initial_byte_capacity: Option<usize>,
    /// Bits allocated up front by bit stream writers; must be a multiple of 8.
    #[serde(default)]
    pub initial_bit_capacity: Option<usize>,
}

impl From<StreamConfigDef> for StreamConfig {
    fn from(value: StreamConfigDef) -> Self {
        let defaults = StreamConfig::default();
        StreamConfig {
            initial_byte_capacity: value
                .initial_byte_capacity
                .unwrap_or(defaults.initial_byte_capacity),
            initial_bit_capacity: value
                .initial_bit_capacity
                .unwrap_or(defaults.initial_bit_capacity),
        }
    }
}

impl From<&StreamConfig> for StreamConfigDef {
    fn from(value: &StreamConfig) -> Self {
        StreamConfigDef {
            initial_byte_capacity: Some(value.initial_byte_capacity),
            initial_bit_capacity: Some(value.initial_bit_capacity),
        }
    }
}

impl StreamConfig {
    /// Converts a definition and validates the result.
    pub fn try_from_def(def: StreamConfigDef) -> Result<Self, ConfigError> {
        let config = StreamConfig::from(def);
        config.validate()?;
        Ok(config)
    }
}
