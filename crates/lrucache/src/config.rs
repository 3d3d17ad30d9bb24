//! Cache configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of resident entries
pub const DEFAULT_CAPACITY: usize = 10;

/// Settings for a [`Cache`](crate::Cache)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Maximum number of resident entries (must be at least 1)
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Create a config with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Parse and validate a JSON configuration document
    ///
    /// Missing fields take their defaults, so `{}` is a valid document.
    pub fn from_json(input: &str) -> Result<Self> {
        let config: CacheConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can build a cache
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfiguration(
                "capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config = CacheConfig::from_json(r#"{ "capacity": 64 }"#).unwrap();
        assert_eq!(config.capacity, 64);

        let config = CacheConfig::from_json("{}").unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_config_rejects_zero() {
        let err = CacheConfig::from_json(r#"{ "capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_config_rejects_garbage() {
        assert!(CacheConfig::from_json(r#"{ "capacity": -3 }"#).is_err());
        assert!(CacheConfig::from_json(r#"{ "size": 3 }"#).is_err());
        assert!(CacheConfig::from_json("capacity=3").is_err());
    }
}
