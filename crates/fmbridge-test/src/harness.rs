//! Test harness wiring a bridge to a mock host

use fmbridge_bridge::{Bridge, BridgeBuilder, BridgeMessage, HostSlot};
use fmbridge_types::BridgeConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::mock::MockHost;

/// A bridge with its own slot and a mock host that may or may not have
/// been handed over yet
pub struct TestBridge {
    pub bridge: Bridge,
    pub host: Arc<MockHost>,
}

impl TestBridge {
    /// Bridge whose handshake already happened
    pub fn ready() -> Self {
        Self::ready_with(BridgeConfig::default())
    }

    pub fn ready_with(config: BridgeConfig) -> Self {
        let harness = Self::waiting_with(config);
        harness.deliver_ready();
        harness
    }

    /// Bridge still waiting for its handshake
    pub fn waiting() -> Self {
        Self::waiting_with(BridgeConfig::default())
    }

    pub fn waiting_with(config: BridgeConfig) -> Self {
        let bridge = BridgeBuilder::new()
            .config(config)
            .slot(Arc::new(HostSlot::new()))
            .build()
            .expect("test bridge configuration is valid");
        Self {
            bridge,
            host: Arc::new(MockHost::new()),
        }
    }

    pub fn slot(&self) -> &Arc<HostSlot> {
        self.bridge.slot()
    }

    /// Deliver the ready message for the mock host now
    pub fn deliver_ready(&self) -> bool {
        self.slot()
            .handle_message(BridgeMessage::ready(self.host.clone()))
    }

    /// Deliver the ready message from a background task after `delay`
    pub fn deliver_ready_after(&self, delay: Duration) -> JoinHandle<bool> {
        let slot = Arc::clone(self.slot());
        let host = self.host.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            slot.handle_message(BridgeMessage::ready(host))
        })
    }
}
