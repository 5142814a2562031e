//! Configuration loading and representation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`InventoryConfig::default_warehouse_capacity`].
pub const DEFAULT_CAPACITY_ENV: &str = "STOCKYARD_DEFAULT_WAREHOUSE_CAPACITY";

pub const DEFAULT_WAREHOUSE_CAPACITY: i64 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid integer: {value:?}")]
    Parse { var: &'static str, value: String },

    #[error("default warehouse capacity must be positive (got {0})")]
    NonPositiveCapacity(i64),
}

/// Settings consumed by the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// `capacity_total` given to warehouses the allocation engine creates on demand.
    pub default_warehouse_capacity: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            default_warehouse_capacity: DEFAULT_WAREHOUSE_CAPACITY,
        }
    }
}

impl InventoryConfig {
    pub fn with_default_capacity(default_warehouse_capacity: i64) -> Result<Self, ConfigError> {
        let config = Self {
            default_warehouse_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from the process environment, falling back to defaults for unset values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using an arbitrary variable lookup (tests inject a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match lookup(DEFAULT_CAPACITY_ENV) {
            Some(raw) => {
                config.default_warehouse_capacity = raw.trim().parse().map_err(|_| ConfigError::Parse {
                    var: DEFAULT_CAPACITY_ENV,
                    value: raw.clone(),
                })?;
            }
            None => {
                tracing::warn!(
                    "{DEFAULT_CAPACITY_ENV} not set; using default capacity {DEFAULT_WAREHOUSE_CAPACITY}"
                );
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_warehouse_capacity <= 0 {
            return Err(ConfigError::NonPositiveCapacity(self.default_warehouse_capacity));
        }
        Ok(())
    }
}
