//! Bridge configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::protocol::{FETCH_SCRIPT, QUICKBOOKS_SCRIPT};

/// Configuration for the host bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// How many times to look for the host object before giving up
    pub max_attempts: u32,

    /// Delay between two looks, in milliseconds
    pub retry_interval_ms: u64,

    /// Script answering data calls
    pub fetch_script: String,

    /// Script starting QuickBooks processing
    pub quickbooks_script: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            retry_interval_ms: 100,
            fetch_script: FETCH_SCRIPT.to_string(),
            quickbooks_script: QUICKBOOKS_SCRIPT.to_string(),
        }
    }
}

/// Error type for configuration building
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Attempt budget is outside the valid range
    #[error("Max attempts must be between 1 and 600, got {0}")]
    InvalidAttempts(u32),
    /// Retry interval is outside the valid range
    #[error("Retry interval must be between 1 and 10000 ms, got {0}")]
    InvalidInterval(u64),
    /// A script name was empty
    #[error("Script name for {0} must not be empty")]
    EmptyScript(&'static str),
}

impl BridgeConfig {
    /// Delay between two looks for the host object
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    /// Longest time a call waits for the host object
    pub fn wait_budget(&self) -> Duration {
        self.retry_interval() * self.max_attempts
    }

    /// Create a new builder instance
    #[inline]
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::new()
    }

    /// Load config from environment variables
    pub fn from_env() -> Self {
        Self {
            max_attempts: std::env::var("FMBRIDGE_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Self::default().max_attempts),
            retry_interval_ms: std::env::var("FMBRIDGE_RETRY_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Self::default().retry_interval_ms),
            fetch_script: std::env::var("FMBRIDGE_FETCH_SCRIPT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| Self::default().fetch_script),
            quickbooks_script: std::env::var("FMBRIDGE_QB_SCRIPT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| Self::default().quickbooks_script),
        }
    }

    /// Check the ranges the builder enforces
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=600).contains(&self.max_attempts) {
            return Err(ConfigError::InvalidAttempts(self.max_attempts));
        }
        if !(1..=10_000).contains(&self.retry_interval_ms) {
            return Err(ConfigError::InvalidInterval(self.retry_interval_ms));
        }
        if self.fetch_script.trim().is_empty() {
            return Err(ConfigError::EmptyScript("fetch"));
        }
        if self.quickbooks_script.trim().is_empty() {
            return Err(ConfigError::EmptyScript("quickbooks"));
        }
        Ok(())
    }
}

/// Builder for [`BridgeConfig`] with validation
#[derive(Debug, Clone, Default)]
pub struct BridgeConfigBuilder {
    max_attempts: Option<u32>,
    retry_interval: Option<Duration>,
    fetch_script: Option<String>,
    quickbooks_script: Option<String>,
}

impl BridgeConfigBuilder {
    /// Create a new builder
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt budget (1-600)
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Set the delay between attempts (1-10000 ms)
    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = Some(interval);
        self
    }

    pub fn fetch_script<S: Into<String>>(mut self, name: S) -> Self {
        self.fetch_script = Some(name.into());
        self
    }

    pub fn quickbooks_script<S: Into<String>>(mut self, name: S) -> Self {
        self.quickbooks_script = Some(name.into());
        self
    }

    /// Build the configuration, filling unset values with defaults
    pub fn build(self) -> Result<BridgeConfig, ConfigError> {
        let defaults = BridgeConfig::default();
        let retry_interval_ms = match self.retry_interval {
            Some(interval) => u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            None => defaults.retry_interval_ms,
        };

        let config = BridgeConfig {
            max_attempts: self.max_attempts.unwrap_or(defaults.max_attempts),
            retry_interval_ms,
            fetch_script: self.fetch_script.unwrap_or(defaults.fetch_script),
            quickbooks_script: self.quickbooks_script.unwrap_or(defaults.quickbooks_script),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.max_attempts, 30);
        assert_eq!(config.retry_interval(), Duration::from_millis(100));
        assert_eq!(config.wait_budget(), Duration::from_secs(3));
        assert_eq!(config.fetch_script, "JS * Fetch Data");
        assert_eq!(config.quickbooks_script, "Initialize QB via JS");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = BridgeConfig::builder()
            .max_attempts(5)
            .retry_interval(Duration::from_millis(20))
            .fetch_script("JS * Fetch Data (staging)")
            .build()
            .unwrap();

        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.retry_interval_ms, 20);
        assert_eq!(config.fetch_script, "JS * Fetch Data (staging)");
        assert_eq!(config.quickbooks_script, QUICKBOOKS_SCRIPT);
    }

    #[test]
    fn test_builder_rejects_out_of_range() {
        assert_eq!(
            BridgeConfig::builder().max_attempts(0).build(),
            Err(ConfigError::InvalidAttempts(0))
        );
        assert_eq!(
            BridgeConfig::builder()
                .retry_interval(Duration::from_secs(11))
                .build(),
            Err(ConfigError::InvalidInterval(11_000))
        );
        assert_eq!(
            BridgeConfig::builder().quickbooks_script("  ").build(),
            Err(ConfigError::EmptyScript("quickbooks"))
        );
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: BridgeConfig = serde_json::from_str(r#"{"max_attempts": 10}"#).unwrap();
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.retry_interval_ms, 100);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var("FMBRIDGE_MAX_ATTEMPTS", "12");
        std::env::set_var("FMBRIDGE_RETRY_INTERVAL_MS", "not-a-number");
        std::env::set_var("FMBRIDGE_QB_SCRIPT", "QB Sync");

        let config = BridgeConfig::from_env();
        assert_eq!(config.max_attempts, 12);
        assert_eq!(config.retry_interval_ms, 100);
        assert_eq!(config.fetch_script, FETCH_SCRIPT);
        assert_eq!(config.quickbooks_script, "QB Sync");

        std::env::remove_var("FMBRIDGE_MAX_ATTEMPTS");
        std::env::remove_var("FMBRIDGE_RETRY_INTERVAL_MS");
        std::env::remove_var("FMBRIDGE_QB_SCRIPT");
    }
}
