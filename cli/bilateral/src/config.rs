//! Environment-driven configuration.
//!
//! Command-line flags override these values where both exist.

use anyhow::{Context, Result};
use bilateral_id::{EmployeeId, DEFAULT_PREFERRED_ID};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The id that wins ties it takes part in.
    pub preferred: EmployeeId,

    /// Seed for reproducible pools and tie-breaks.
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preferred: DEFAULT_PREFERRED_ID,
            seed: None,
            log_level: "warn".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let preferred = lookup("BILATERAL_PREFERRED_ID")
            .map(|v| v.parse::<EmployeeId>())
            .transpose()
            .context("BILATERAL_PREFERRED_ID must be a positive integer.")?
            .unwrap_or(defaults.preferred);

        let seed = lookup("BILATERAL_SEED")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("BILATERAL_SEED must be an unsigned integer.")?;

        let log_level = lookup("BILATERAL_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_json = lookup("BILATERAL_LOG_JSON")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Self {
            preferred,
            seed,
            log_level,
            log_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.preferred.value(), 1099);
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BILATERAL_PREFERRED_ID", "1009"),
            ("BILATERAL_SEED", "42"),
            ("BILATERAL_LOG_LEVEL", "debug"),
            ("BILATERAL_LOG_JSON", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.preferred.value(), 1009);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("BILATERAL_PREFERRED_ID", "abc")])).is_err());
        assert!(Config::from_lookup(lookup(&[("BILATERAL_SEED", "-1")])).is_err());
    }
}
