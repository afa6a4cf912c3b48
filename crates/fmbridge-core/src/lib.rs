// Copyright (c) 2025 FMBridge Contributors. All Rights Reserved.
// Licensed under BSL-1.1.

//! Core abstractions for talking to a FileMaker host
//!
//! This crate provides the pieces of the bridge that do not need the host
//! object itself: the error taxonomy every failure is reported with, the
//! formatting and validation of outgoing parameters, the normalization of
//! raw script results, and the timer state used by task views.

pub mod error;
pub mod operation;
pub mod params;
pub mod response;
pub mod timer;

pub use error::{BridgeError, ErrorCode, ErrorKind, HostError, Result, ValidationError};
pub use operation::{handle_filemaker_operation, OperationFailure};
pub use params::{format_params, is_truthy, validate_params};
pub use response::{handle_script_result, is_pending, pending_marker};
pub use timer::{TimerError, TimerState, TimerStopRequest};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```
/// use fmbridge_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        error::{BridgeError, ErrorCode, ErrorKind, HostError, Result, ValidationError},
        operation::{handle_filemaker_operation, OperationFailure},
        params::{format_params, validate_params},
        response::handle_script_result,
        timer::TimerState,
    };
}
