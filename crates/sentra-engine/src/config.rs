//! Engine configuration.
//!
//! All fields have compile-time defaults; `#[serde(default)]` keeps
//! every field optional in the config file.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 120;
const DEFAULT_RESOLVER_TTL_SECS: u64 = 60;

/// Tunables for the privilege engine.
///
/// # Example
///
/// ```
/// use sentra_engine::EngineConfig;
///
/// let config = EngineConfig::from_toml("refresh_interval_secs = 30").unwrap();
/// assert_eq!(config.refresh_interval().as_secs(), 30);
/// assert_eq!(config.resolver_ttl().as_secs(), 60); // default
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds between scheduled policy snapshot refreshes.
    pub refresh_interval_secs: u64,

    /// Seconds a cached membership resolution stays fresh. This is the
    /// staleness window for group/role changes.
    pub resolver_ttl_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            resolver_ttl_secs: DEFAULT_RESOLVER_TTL_SECS,
        }
    }
}

impl EngineConfig {
    /// Creates a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot refresh interval as a [`Duration`].
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// The resolver cache TTL as a [`Duration`].
    #[must_use]
    pub fn resolver_ttl(&self) -> Duration {
        Duration::from_secs(self.resolver_ttl_secs)
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::new();
        assert_eq!(config.refresh_interval(), Duration::from_secs(120));
        assert_eq!(config.resolver_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn toml_round_trip() {
        let config = EngineConfig {
            refresh_interval_secs: 30,
            resolver_ttl_secs: 15,
        };
        let toml_str = config.to_toml().expect("serialize");
        let parsed = EngineConfig::from_toml(&toml_str).expect("deserialize");
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = EngineConfig::from_toml("resolver_ttl_secs = 5").expect("partial config");
        assert_eq!(config.resolver_ttl_secs, 5);
        assert_eq!(config.refresh_interval_secs, DEFAULT_REFRESH_INTERVAL_SECS);
    }

    #[test]
    fn empty_config_is_default() {
        let config = EngineConfig::from_toml("").expect("empty config");
        assert_eq!(config, EngineConfig::default());
    }
}
