//! Builder pattern for creating and configuring bridges

use fmbridge_types::{BridgeConfig, ConfigError};
use std::sync::Arc;
use std::time::Duration;

use crate::client::Bridge;
use crate::host::{FileMakerHost, HostSlot};

/// Builder for [`Bridge`] handles
///
/// # Example
///
/// ```
/// use fmbridge_bridge::BridgeBuilder;
/// use std::time::Duration;
///
/// let bridge = BridgeBuilder::new()
///     .max_attempts(50)
///     .retry_interval(Duration::from_millis(50))
///     .build()
///     .unwrap();
///
/// assert_eq!(bridge.config().max_attempts, 50);
/// assert!(!bridge.slot().is_initialized());
/// ```
#[derive(Default)]
pub struct BridgeBuilder {
    config: Option<BridgeConfig>,
    max_attempts: Option<u32>,
    retry_interval: Option<Duration>,
    slot: Option<Arc<HostSlot>>,
    host: Option<Arc<dyn FileMakerHost>>,
}

impl BridgeBuilder {
    /// Create a new bridge builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: BridgeConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = Some(interval);
        self
    }

    /// Share a slot with other bridges (defaults to a private one)
    pub fn slot(mut self, slot: Arc<HostSlot>) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Use the process-wide slot
    pub fn global_slot(self) -> Self {
        self.slot(HostSlot::global())
    }

    /// Install a host right away, as if its ready signal had arrived
    pub fn host(mut self, host: Arc<dyn FileMakerHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Validate the configuration and create the bridge
    pub fn build(self) -> Result<Bridge, ConfigError> {
        let base = self.config.unwrap_or_default();
        let config = BridgeConfig::builder()
            .max_attempts(self.max_attempts.unwrap_or(base.max_attempts))
            .retry_interval(
                self.retry_interval
                    .unwrap_or_else(|| base.retry_interval()),
            )
            .fetch_script(base.fetch_script)
            .quickbooks_script(base.quickbooks_script)
            .build()?;

        let slot = self.slot.unwrap_or_else(|| Arc::new(HostSlot::new()));
        if let Some(host) = self.host {
            slot.install(host);
        }
        Ok(Bridge::new(slot, config))
    }
}
