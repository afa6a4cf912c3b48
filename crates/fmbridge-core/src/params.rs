//! Formatting and validation of outgoing call parameters

use fmbridge_types::{LAYOUTS_ALIAS_FIELD, LAYOUT_FIELD, PROTOCOL_VERSION, VERSION_FIELD};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Truthiness as the host-side scripts and the web layer understand it.
///
/// `null`, `false`, `0`, `NaN` and the empty string are falsy; everything
/// else, including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_field<'a>(params: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    params.get(key).filter(|value| is_truthy(value))
}

/// Formats parameters for a FileMaker call.
///
/// All caller fields are copied, the protocol version is stamped, `layout`
/// is resolved from `layout` or the legacy `layouts` alias (`layout` wins),
/// and the alias is dropped. When neither names a layout the output carries
/// no `layout` key at all.
pub fn format_params(params: &Map<String, Value>) -> Map<String, Value> {
    let layout = truthy_field(params, LAYOUT_FIELD)
        .or_else(|| truthy_field(params, LAYOUTS_ALIAS_FIELD))
        .cloned();

    let mut formatted = params.clone();
    formatted.insert(
        VERSION_FIELD.to_string(),
        Value::String(PROTOCOL_VERSION.to_string()),
    );
    match layout {
        Some(layout) => {
            formatted.insert(LAYOUT_FIELD.to_string(), layout);
        }
        None => {
            formatted.remove(LAYOUT_FIELD);
        }
    }
    formatted.remove(LAYOUTS_ALIAS_FIELD);
    formatted
}

/// Checks that every required field is present and truthy.
///
/// The error lists every missing field, not just the first one.
pub fn validate_params<S: AsRef<str>>(
    params: &Map<String, Value>,
    required: &[S],
) -> Result<(), ValidationError> {
    let missing: Vec<String> = required
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| truthy_field(params, name).is_none())
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingParams { missing })
    }
}
