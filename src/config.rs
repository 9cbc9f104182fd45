//! Container configuration
//!
//! Optional sizing for the container's sharded store, read from TOML:
//!
//! ```toml
//! initial_capacity = 64
//! shard_amount = 16
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{GotError, GotResult};

/// Sizing options for [`Container::with_config`](crate::Container::with_config)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Number of identities to reserve room for up front
    pub initial_capacity: usize,

    /// Number of shards in the store; `None` lets the map pick from the CPU count
    pub shard_amount: Option<usize>,
}

impl ContainerConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> GotResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> GotResult<Self> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GotError::io(format!("reading config from {}", path.display()), e))?;

        let config: Self = toml::from_str(&content).map_err(|e| GotError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        match config.invalid_reason() {
            Some(reason) => Err(GotError::ConfigInvalid {
                path: path.to_path_buf(),
                reason,
            }),
            None => Ok(config),
        }
    }

    /// Check the values are usable by the store
    pub fn validate(&self) -> GotResult<()> {
        match self.invalid_reason() {
            Some(reason) => Err(GotError::ConfigValue(reason)),
            None => Ok(()),
        }
    }

    fn invalid_reason(&self) -> Option<String> {
        match self.shard_amount {
            Some(n) if n <= 1 || !n.is_power_of_two() => Some(format!(
                "shard_amount must be a power of two greater than 1, got {}",
                n
            )),
            _ => None,
        }
    }
}
