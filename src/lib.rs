// Copyright (c) 2025 FMBridge Contributors. All Rights Reserved.
// Licensed under BSL-1.1.

//! # FMBridge
//!
//! Talk to the FileMaker host object from code running inside a FileMaker
//! web viewer.
//!
//! ## Overview
//!
//! The host object is injected by FileMaker at some unknown point after the
//! web viewer starts. FMBridge:
//! - waits for it through a one-time `FM_BRIDGE_READY` handshake
//! - runs host scripts in the style the caller asks for
//! - normalizes every result and failure into a stable error taxonomy
//!
//! ## Quick Start
//!
//! ```no_run
//! use fmbridge::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     fmbridge::logging::init(false);
//!
//!     let outcome = handle_filemaker_operation(|| async {
//!         let request = CallRequest::new(Layout::Tasks).action(Action::Read);
//!         global_bridge().fetch(request).await
//!     })
//!     .await;
//!
//!     match outcome {
//!         Ok(tasks) => println!("{tasks}"),
//!         Err(failure) => eprintln!("{}: {}", failure.code, failure.message),
//!     }
//! }
//! ```

// Re-export core functionality
pub use fmbridge_core as core;

// Re-export protocol types and configuration
pub use fmbridge_types as types;

// Re-export the host bridge
#[cfg(feature = "bridge")]
pub use fmbridge_bridge as bridge;

// Re-export commonly used items
pub use fmbridge_core::{BridgeError, ErrorKind, OperationFailure, Result};
pub use fmbridge_types::{BridgeConfig, CallRequest, Layout};

#[cfg(feature = "bridge")]
pub use fmbridge_bridge::{
    fetch_data_from_filemaker, global_bridge, handle_bridge_message, initialize_quickbooks,
    Bridge, BridgeMessage, FileMakerHost,
};

pub mod logging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::types::{Action, BridgeConfig, CallRequest, Layout};

    #[cfg(feature = "bridge")]
    pub use crate::bridge::{
        fetch_data_from_filemaker, global_bridge, handle_bridge_message, initialize_quickbooks,
        Bridge, BridgeBuilder, BridgeMessage, FileMakerHost, HostSlot, QuickBooksBatch,
    };
}
