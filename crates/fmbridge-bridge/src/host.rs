//! The embedded host object and the one-time handshake that delivers it

use async_trait::async_trait;
use fmbridge_core::HostError;
use fmbridge_types::BRIDGE_READY;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Callable surface of the FileMaker host object.
///
/// `perform_script` is the host's own entry point: it runs a named script
/// and returns whatever the script hands back right away (often nothing).
/// `perform_script_async` is the awaitable wrapper around the same
/// primitive, resolving once the script calls back with its result.
#[async_trait]
pub trait FileMakerHost: Send + Sync {
    /// Whether the script entry point has been installed on the host object
    fn can_perform_script(&self) -> bool {
        true
    }

    /// Run a script directly
    fn perform_script(&self, script: &str, param: &str) -> Result<Option<String>, HostError>;

    /// Run a script and wait for its result
    async fn perform_script_async(
        &self,
        script: &str,
        param: &str,
    ) -> Result<Option<String>, HostError>;
}

/// Message delivered by the hosting environment
#[derive(Clone)]
pub struct BridgeMessage {
    /// Discriminator, [`BRIDGE_READY`] for the handshake
    pub kind: String,
    /// Host object carried by the handshake
    pub api: Option<Arc<dyn FileMakerHost>>,
}

impl BridgeMessage {
    /// The handshake message carrying the host object
    pub fn ready(api: Arc<dyn FileMakerHost>) -> Self {
        Self {
            kind: BRIDGE_READY.to_string(),
            api: Some(api),
        }
    }

    /// Any other message
    pub fn other(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            api: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.kind == BRIDGE_READY
    }
}

impl fmt::Debug for BridgeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeMessage")
            .field("kind", &self.kind)
            .field("has_api", &self.api.is_some())
            .finish()
    }
}

/// Write-once holder of the host object.
///
/// The first handshake fills the slot; it is never replaced or cleared.
/// Readers get a shared reference and never block.
#[derive(Default)]
pub struct HostSlot {
    host: OnceLock<Arc<dyn FileMakerHost>>,
}

static GLOBAL_SLOT: OnceLock<Arc<HostSlot>> = OnceLock::new();

impl HostSlot {
    pub fn new() -> Self {
        Self {
            host: OnceLock::new(),
        }
    }

    /// Process-wide slot shared by the free-standing bridge functions
    pub fn global() -> Arc<HostSlot> {
        Arc::clone(GLOBAL_SLOT.get_or_init(|| Arc::new(HostSlot::new())))
    }

    /// Store the host object unless one is already stored.
    ///
    /// Returns `true` when this call initialized the slot.
    pub fn install(&self, host: Arc<dyn FileMakerHost>) -> bool {
        self.host.set(host).is_ok()
    }

    /// The host object, once the handshake happened
    pub fn get(&self) -> Option<&Arc<dyn FileMakerHost>> {
        self.host.get()
    }

    /// The host object, only if its script entry point is usable
    pub fn callable(&self) -> Option<Arc<dyn FileMakerHost>> {
        self.host
            .get()
            .filter(|host| host.can_perform_script())
            .cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.host.get().is_some()
    }

    /// Handle one message from the hosting environment.
    ///
    /// Only the first ready message carrying a host object initializes the
    /// slot; later ones are logged and ignored. Returns `true` when this
    /// message initialized the slot.
    pub fn handle_message(&self, message: BridgeMessage) -> bool {
        if !message.is_ready() {
            return false;
        }

        let was_initialized = self.is_initialized();
        debug!(was_initialized, "Received {} event", BRIDGE_READY);

        let Some(api) = message.api else {
            debug!("{} event carried no host object", BRIDGE_READY);
            return false;
        };

        let installed = self.install(api);
        if installed {
            info!("FileMaker bridge initialized");
        }
        installed
    }

    /// Consume messages until every sender is dropped
    pub async fn listen(&self, mut messages: mpsc::UnboundedReceiver<BridgeMessage>) {
        while let Some(message) = messages.recv().await {
            self.handle_message(message);
        }
        debug!("Bridge message channel closed");
    }

    /// Spawn a listener task for this slot and return the sending side
    pub fn spawn_listener(self: &Arc<Self>) -> mpsc::UnboundedSender<BridgeMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        let slot = Arc::clone(self);
        tokio::spawn(async move { slot.listen(rx).await });
        tx
    }
}

impl fmt::Debug for HostSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostSlot")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedHost(&'static str);

    #[async_trait]
    impl FileMakerHost for NamedHost {
        fn perform_script(&self, _script: &str, _param: &str) -> Result<Option<String>, HostError> {
            Ok(Some(format!(r#"{{"host":"{}"}}"#, self.0)))
        }

        async fn perform_script_async(
            &self,
            script: &str,
            param: &str,
        ) -> Result<Option<String>, HostError> {
            self.perform_script(script, param)
        }
    }

    fn host_name(slot: &HostSlot) -> Option<String> {
        slot.get()
            .and_then(|host| host.perform_script("", "").ok().flatten())
    }

    #[test]
    fn test_first_ready_signal_wins() {
        let slot = HostSlot::new();
        assert!(!slot.is_initialized());

        assert!(slot.handle_message(BridgeMessage::ready(Arc::new(NamedHost("first")))));
        assert!(!slot.handle_message(BridgeMessage::ready(Arc::new(NamedHost("second")))));

        assert!(slot.is_initialized());
        assert_eq!(host_name(&slot).as_deref(), Some(r#"{"host":"first"}"#));
    }

    #[test]
    fn test_other_messages_are_ignored() {
        let slot = HostSlot::new();
        assert!(!slot.handle_message(BridgeMessage::other("RESIZE")));
        assert!(!slot.handle_message(BridgeMessage {
            kind: BRIDGE_READY.to_string(),
            api: None,
        }));
        assert!(!slot.is_initialized());
    }

    #[tokio::test]
    async fn test_listener_installs_host() {
        let slot = Arc::new(HostSlot::new());
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(BridgeMessage::other("PING")).unwrap();
        tx.send(BridgeMessage::ready(Arc::new(NamedHost("a")))).unwrap();
        tx.send(BridgeMessage::ready(Arc::new(NamedHost("b")))).unwrap();
        drop(tx);

        slot.listen(rx).await;
        assert_eq!(host_name(&slot).as_deref(), Some(r#"{"host":"a"}"#));
    }

    #[test]
    fn test_debug_hides_host() {
        let message = BridgeMessage::ready(Arc::new(NamedHost("x")));
        assert_eq!(
            format!("{message:?}"),
            r#"BridgeMessage { kind: "FM_BRIDGE_READY", has_api: true }"#
        );
    }
}
