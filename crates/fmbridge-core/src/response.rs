//! Normalization of raw script results

use serde_json::{json, Value};

use crate::error::{BridgeError, Result};
use crate::params::is_truthy;

const DEFAULT_ERROR_MESSAGE: &str = "Unknown FileMaker error";

/// Marker returned when the real payload arrives later through the host callback
pub fn pending_marker() -> Value {
    json!({ "status": "pending" })
}

/// Whether a response is the deferred-delivery marker
pub fn is_pending(response: &Value) -> bool {
    response.get("status").and_then(Value::as_str) == Some("pending")
}

/// Turn the raw string a script returned into a payload or a typed error.
///
/// An absent or empty result is [`BridgeError::NullResult`], as is a result
/// that parses to JSON `null`. A payload with a truthy `error` field is
/// [`BridgeError::FileMaker`] carrying its `message` and `details`.
/// Anything else is returned as parsed.
pub fn handle_script_result(raw: Option<&str>) -> Result<Value> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(BridgeError::NullResult),
    };

    let parsed: Value = serde_json::from_str(raw).map_err(BridgeError::Parse)?;
    if parsed.is_null() {
        return Err(BridgeError::NullResult);
    }

    if parsed.get("error").is_some_and(is_truthy) {
        let message = parsed
            .get("message")
            .filter(|m| is_truthy(m))
            .map(|m| match m {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        let details = parsed.get("details").cloned();
        return Err(BridgeError::filemaker(message, details));
    }

    Ok(parsed)
}
