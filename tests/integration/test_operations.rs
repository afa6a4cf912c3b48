//! Integration tests for wrapped FileMaker operations
//!
//! Views run every bridge call through `handle_filemaker_operation` and
//! render the resulting failure shape, so these tests drive the whole stack
//! through a mock host.

use fmbridge::core::{handle_filemaker_operation, validate_params, BridgeError};
use fmbridge::prelude::*;
use fmbridge_test::TestBridge;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_success_is_untouched() {
    let harness = TestBridge::ready();
    harness.host.respond_with(json!({ "response": { "data": [{ "recordId": "1" }] } }));

    let bridge = harness.bridge.clone();
    let value = handle_filemaker_operation(|| async move {
        bridge.fetch(CallRequest::new(Layout::Tasks).action(Action::Read)).await
    })
    .await
    .unwrap();

    assert_eq!(value["response"]["data"][0]["recordId"], "1");
}

#[tokio::test(start_paused = true)]
async fn test_timeout_failure_shape() {
    let harness = TestBridge::waiting();
    let bridge = harness.bridge.clone();

    let failure = handle_filemaker_operation(|| async move {
        bridge.fetch(CallRequest::new(Layout::Notes)).await
    })
    .await
    .unwrap_err();

    assert_eq!(
        serde_json::to_value(&failure).unwrap(),
        json!({
            "error": true,
            "code": "TIMEOUT",
            "message": "FileMaker object is unavailable after 3 seconds",
        })
    );
}

#[tokio::test]
async fn test_host_error_carries_details() {
    let harness = TestBridge::ready();
    harness.host.respond_with(json!({
        "error": true,
        "message": "Record is locked",
        "details": { "code": 301 },
    }));
    let bridge = harness.bridge.clone();

    let failure = handle_filemaker_operation(|| async move {
        bridge
            .fetch(CallRequest::new(Layout::Projects).action(Action::Update).record_id("4"))
            .await
    })
    .await
    .unwrap_err();

    assert_eq!(failure.code, ErrorKind::FmError);
    assert_eq!(failure.message, "Record is locked");
    assert_eq!(failure.details, Some(json!({ "code": 301 })));
}

#[tokio::test]
async fn test_validation_failure_is_unknown_error() {
    let failure = handle_filemaker_operation(|| async {
        let params = CallRequest::new(Layout::Tasks).action(Action::Update).build();
        validate_params(&params, &["recordId", "fieldData"])?;
        Ok::<_, BridgeError>(params)
    })
    .await
    .unwrap_err();

    assert_eq!(failure.code, ErrorKind::UnknownError);
    assert_eq!(
        failure.message,
        "Missing required parameters: recordId, fieldData"
    );
}

#[tokio::test]
async fn test_unparseable_result() {
    let harness = TestBridge::ready();
    harness.host.respond_raw(Some("<html>"));
    let bridge = harness.bridge.clone();

    let failure = handle_filemaker_operation(|| async move {
        bridge.fetch(CallRequest::new(Layout::Links)).await
    })
    .await
    .unwrap_err();

    assert_eq!(failure.code, ErrorKind::ScriptError);
    assert!(failure.message.starts_with("Invalid FileMaker response"));
}

/// A stopped timer is saved through a callback-delivered call
#[tokio::test(start_paused = true)]
async fn test_timer_stop_goes_out_deferred() {
    let harness = TestBridge::waiting();
    let _delivery = harness.deliver_ready_after(Duration::from_millis(300));

    let now = chrono::Utc::now();
    let mut timer = TimerState::new();
    timer.start("T-55", now);
    let stop = timer
        .stop(now + chrono::Duration::minutes(45), "Review", true)
        .unwrap();

    let request = CallRequest::for_layout("devRecords")
        .field("action", "stopTimer")
        .field("timer", serde_json::to_value(&stop).unwrap())
        .callback("returnRecords");
    let result = harness.bridge.fetch(request).await.unwrap();

    assert!(fmbridge::core::is_pending(&result));
    let sent = harness.host.last_call().unwrap().json();
    assert_eq!(sent["timer"]["recordId"], "T-55");
    assert_eq!(sent["callBackName"], "returnRecords");
}
