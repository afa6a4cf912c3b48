//! Test assertions for bridge results

use fmbridge_core::{is_pending, BridgeError, ErrorKind};
use serde_json::Value;

/// Assert that a call failed with the given code, returning the error
pub fn assert_error_kind<T: std::fmt::Debug>(
    result: Result<T, BridgeError>,
    expected: ErrorKind,
) -> BridgeError {
    match result {
        Ok(value) => panic!("Expected {expected} error but got success: {value:?}"),
        Err(err) => {
            assert_eq!(
                err.kind(),
                expected,
                "Expected error code {} but got {} ({})",
                expected,
                err.kind(),
                err
            );
            err
        }
    }
}

/// Assert that a call resolved with the deferred-delivery marker
pub fn assert_pending(result: &Result<Value, BridgeError>) {
    match result {
        Ok(value) => assert!(is_pending(value), "Expected pending marker but got: {value}"),
        Err(err) => panic!("Expected pending marker but got error: {err}"),
    }
}

/// Assert that a call succeeded, returning the payload
pub fn assert_payload(result: Result<Value, BridgeError>) -> Value {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected payload but got {} error: {err}", err.kind()),
    }
}
