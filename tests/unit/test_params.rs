//! Unit tests for parameter formatting and validation

use fmbridge::core::{format_params, validate_params, BridgeError, ErrorKind, ValidationError};
use fmbridge::types::{Action, CallRequest, Layout};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[test]
fn test_builder_output_is_already_formatted() {
    let request = CallRequest::new(Layout::Projects)
        .action(Action::Update)
        .record_id("12")
        .data(json!({ "status": "Open" }))
        .build();

    let formatted = format_params(&request);
    assert_eq!(formatted["layout"], "devProjects");
    assert_eq!(formatted["version"], "vLatest");
    assert_eq!(formatted["action"], "update");
    assert_eq!(formatted["recordId"], "12");
    assert_eq!(formatted["fieldData"], json!({ "status": "Open" }));
}

#[test]
fn test_layout_wins_over_alias() {
    let formatted = format_params(&object(json!({
        "layout": "devCustomers",
        "layouts": "devTasks",
    })));
    assert_eq!(formatted["layout"], "devCustomers");
    assert!(!formatted.contains_key("layouts"));
}

#[test]
fn test_falsy_layout_falls_back_to_alias() {
    let formatted = format_params(&object(json!({ "layout": "", "layouts": "devNotes" })));
    assert_eq!(formatted["layout"], "devNotes");
}

#[test]
fn test_no_layout_at_all() {
    let formatted = format_params(&object(json!({ "action": "read", "layouts": null })));
    assert!(!formatted.contains_key("layout"));
    assert!(!formatted.contains_key("layouts"));
    assert_eq!(formatted["version"], "vLatest");
}

#[test]
fn test_caller_version_is_overwritten() {
    let formatted = format_params(&object(json!({ "layout": "devTasks", "version": "v1" })));
    assert_eq!(formatted["version"], "vLatest");
}

#[test]
fn test_validation_reports_every_missing_field() {
    let params = object(json!({ "layout": "devTasks", "recordId": 0, "query": [] }));

    let err = validate_params(&params, &["layout", "recordId", "fieldData", "query"]).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingParams {
            missing: vec!["recordId".to_string(), "fieldData".to_string()],
        }
    );
    assert_eq!(
        err.to_string(),
        "Missing required parameters: recordId, fieldData"
    );

    let err: BridgeError = err.into();
    assert_eq!(err.kind(), ErrorKind::UnknownError);
}

#[test]
fn test_validation_accepts_owned_names() {
    let required: Vec<String> = vec!["layout".into()];
    let params = CallRequest::new(Layout::Tasks).build();
    assert!(validate_params(&params, &required).is_ok());
}

proptest! {
    #[test]
    fn prop_formatting_is_idempotent(
        layout in proptest::option::of("[a-zA-Z]{0,12}"),
        alias in proptest::option::of("[a-zA-Z]{0,12}"),
        extra in "[a-z]{1,8}",
    ) {
        let mut params = Map::new();
        if let Some(layout) = layout {
            params.insert("layout".into(), Value::String(layout));
        }
        if let Some(alias) = alias {
            params.insert("layouts".into(), Value::String(alias));
        }
        params.insert("x".into(), Value::String(extra.clone()));

        let once = format_params(&params);
        prop_assert_eq!(format_params(&once), once.clone());
        prop_assert!(!once.contains_key("layouts"));
        prop_assert_eq!(&once["version"], "vLatest");
        prop_assert_eq!(&once["x"], &Value::String(extra));
    }
}
