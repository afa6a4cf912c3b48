// Copyright (c) 2025 FMBridge Contributors. All Rights Reserved.
// Licensed under BSL-1.1.

//! # FileMaker Bridge
//!
//! Host bridge adapter between a web viewer and the FileMaker host object
//! embedded around it.
//!
//! ## Features
//!
//! - **Handshake**: the host object arrives once through an
//!   `FM_BRIDGE_READY` message and is kept in a write-once [`HostSlot`]
//! - **Bounded wait**: calls made before the handshake poll the slot
//!   (30 × 100 ms by default) and fail with `TIMEOUT` after that
//! - **Dispatch styles**: callback-delivered requests are fired and
//!   forgotten, others are awaited or called directly ([`DispatchStyle`])
//! - **Normalized results**: every failure carries a stable error code
//!
//! ## Quick Start
//!
//! ```no_run
//! use fmbridge_bridge::fetch_data_from_filemaker;
//! use fmbridge_types::{Action, CallRequest, Layout};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), fmbridge_core::BridgeError> {
//!     // Somewhere in the host integration:
//!     // fmbridge_bridge::handle_bridge_message(BridgeMessage::ready(host));
//!
//!     let params = CallRequest::new(Layout::Customers)
//!         .action(Action::Read)
//!         .build();
//!     let customers = fetch_data_from_filemaker(&params, true).await?;
//!     println!("{customers}");
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod client;
pub mod dispatch;
pub mod host;
pub mod quickbooks;

pub use builder::BridgeBuilder;
pub use client::Bridge;
pub use dispatch::DispatchStyle;
pub use host::{BridgeMessage, FileMakerHost, HostSlot};
pub use quickbooks::{QuickBooksBatch, QuickBooksRequest};

use fmbridge_core::Result;
use fmbridge_types::BridgeConfig;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::warn;

static GLOBAL_BRIDGE: OnceLock<Bridge> = OnceLock::new();

/// Bridge over the process-wide slot.
///
/// Configuration comes from the environment on first use; an invalid
/// environment falls back to the defaults.
pub fn global_bridge() -> &'static Bridge {
    GLOBAL_BRIDGE.get_or_init(|| {
        let config = BridgeConfig::from_env();
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!("Ignoring bridge configuration from environment: {}", err);
                BridgeConfig::default()
            }
        };
        Bridge::new(HostSlot::global(), config)
    })
}

/// Feed a message from the hosting environment to the process-wide slot
pub fn handle_bridge_message(message: BridgeMessage) -> bool {
    HostSlot::global().handle_message(message)
}

/// Run the fetch script through the process-wide bridge
pub async fn fetch_data_from_filemaker(params: &Map<String, Value>, is_async: bool) -> Result<Value> {
    global_bridge().fetch_data(params, is_async).await
}

/// Start QuickBooks processing through the process-wide bridge
pub async fn initialize_quickbooks(request: impl Into<QuickBooksRequest>) -> Result<Value> {
    global_bridge().initialize_quickbooks(request).await
}
