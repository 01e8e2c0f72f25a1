//! Runtime configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! log_filter = "fundline=debug"
//! seed_fixtures = true
//!
//! [ledger]
//! latency_ms = 500
//! network_failure_rate = 0.1
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Fundline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundlineConfig {
    /// Simulated ledger behaviour
    pub ledger: LedgerConfig,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Seed the catalog with the reference campaigns
    pub seed_fixtures: bool,
}

impl FundlineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// `Parse` on malformed TOML, `Invalid` on out-of-range values
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `Invalid` naming the offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.ledger.network_failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Invalid(format!(
                "ledger.network_failure_rate must be within 0..=1, got {rate}"
            )));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".to_string()));
        }
        Ok(())
    }

    /// With simulated ledger latency
    #[inline]
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.ledger.latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With injected network failure probability
    #[inline]
    #[must_use]
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.ledger.network_failure_rate = rate;
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Simulated ledger latency
    #[inline]
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.ledger.latency_ms)
    }
}

impl Default for FundlineConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            log_filter: "info".to_string(),
            seed_fixtures: true,
        }
    }
}

/// Simulated ledger settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Delay before each transfer reaches the ledger
    pub latency_ms: u64,
    /// Probability that a transfer fails with a network error
    pub network_failure_rate: f64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            latency_ms: 3000,
            network_failure_rate: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = FundlineConfig::from_toml_str("").unwrap();
        assert_eq!(config, FundlineConfig::default());
        assert_eq!(config.latency(), Duration::from_secs(3));
    }

    #[test]
    fn partial_document_overrides() {
        let config = FundlineConfig::from_toml_str(
            r#"
            log_filter = "fundline=debug"

            [ledger]
            latency_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.log_filter, "fundline=debug");
        assert_eq!(config.ledger.latency_ms, 250);
        assert_eq!(config.ledger.network_failure_rate, 0.0);
        assert!(config.seed_fixtures);
    }

    #[test]
    fn failure_rate_out_of_range() {
        let err = FundlineConfig::from_toml_str("[ledger]\nnetwork_failure_rate = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml() {
        let err = FundlineConfig::from_toml_str("ledger = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed_fixtures = false").unwrap();
        writeln!(file, "[ledger]").unwrap();
        writeln!(file, "latency_ms = 10").unwrap();

        let config = FundlineConfig::load(file.path()).unwrap();
        assert!(!config.seed_fixtures);
        assert_eq!(config.latency(), Duration::from_millis(10));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FundlineConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn builder_setters() {
        let config = FundlineConfig::new()
            .with_latency(Duration::from_millis(42))
            .with_failure_rate(0.25)
            .with_log_filter("warn");
        assert_eq!(config.ledger.latency_ms, 42);
        assert_eq!(config.ledger.network_failure_rate, 0.25);
        assert_eq!(config.log_filter, "warn");
        assert!(config.validate().is_ok());
    }
}
