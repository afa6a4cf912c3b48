// Copyright (c) 2025 FMBridge Contributors. All Rights Reserved.
// Licensed under BSL-1.1.

//! Protocol types for the FileMaker web-viewer bridge
//!
//! This crate holds the pieces shared by every layer of the bridge: the
//! wire constants the host scripts expect, the layout and action names the
//! application talks about, a builder for call requests, and the bridge
//! configuration.

pub mod config;
pub mod protocol;
pub mod request;

pub use config::{BridgeConfig, BridgeConfigBuilder, ConfigError};
pub use protocol::{
    Action, Layout, BRIDGE_READY, CALLBACK_FIELD, FETCH_SCRIPT, LAYOUTS_ALIAS_FIELD, LAYOUT_FIELD,
    PROTOCOL_VERSION, QUICKBOOKS_SCRIPT, RETURN_CONTEXT, RETURN_RECORDS, VERSION_FIELD,
};
pub use request::CallRequest;
