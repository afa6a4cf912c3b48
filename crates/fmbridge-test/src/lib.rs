// Copyright (c) 2025 FMBridge Contributors. All Rights Reserved.
// Licensed under BSL-1.1.

//! Testing utilities for the FileMaker bridge
//!
//! This crate provides a mock host object and a small harness so bridge
//! behaviour can be exercised without a FileMaker web viewer.

pub mod assertions;
pub mod harness;
pub mod mock;

pub use assertions::{assert_error_kind, assert_payload, assert_pending};
pub use harness::TestBridge;
pub use mock::{CallStyle, MockHost, RecordedCall, ScriptedResponse};
