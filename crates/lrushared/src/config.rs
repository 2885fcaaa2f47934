//! Cache configuration

use lrukit::{Error, Result, MIN_CAPACITY};
use serde::{Deserialize, Serialize};

/// Capacity used when a config does not name one
pub const DEFAULT_CAPACITY: usize = 1024;

/// Settings for a [`SharedLru`](crate::SharedLru)
///
/// Deserializes from any serde format; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Maximum number of entries (must exceed 1)
    pub capacity: usize,

    /// Label attached to this cache's log events
    pub name: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            name: None,
        }
    }
}

impl CacheConfig {
    /// Config with the given capacity and no name
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Set the name used in log events
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check the capacity without building a cache
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - if `capacity` is less than 2
    pub fn validate(&self) -> Result<()> {
        if self.capacity < MIN_CAPACITY {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: CacheConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, CacheConfig::default());
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config: CacheConfig =
            serde_json::from_str(r#"{"capacity": 16, "name": "sensors"}"#).unwrap();

        assert_eq!(config, CacheConfig::with_capacity(16).name("sensors"));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let result = serde_json::from_str::<CacheConfig>(r#"{"capacty": 16}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validate() {
        assert_eq!(
            CacheConfig::with_capacity(1).validate(),
            Err(Error::InvalidCapacity(1))
        );
        assert_eq!(CacheConfig::with_capacity(2).validate(), Ok(()));
    }
}
