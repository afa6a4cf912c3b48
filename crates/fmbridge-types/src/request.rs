//! Builder for bridge call requests

use serde_json::{Map, Value};

use crate::protocol::{Action, Layout, CALLBACK_FIELD, LAYOUT_FIELD};

/// Fluent builder for the field mapping sent to the fetch script.
///
/// The built mapping is what callers hand to the bridge; the bridge adds the
/// protocol version itself.
///
/// # Example
///
/// ```
/// use fmbridge_types::{Action, CallRequest, Layout};
/// use serde_json::json;
///
/// let params = CallRequest::new(Layout::Tasks)
///     .action(Action::Read)
///     .callback("returnRecords")
///     .field("query", json!([{ "_projectID": "P-1" }]))
///     .build();
///
/// assert_eq!(params["layout"], "devTasks");
/// assert_eq!(params["action"], "read");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallRequest {
    fields: Map<String, Value>,
}

impl CallRequest {
    /// Start a request against a known layout
    pub fn new(layout: Layout) -> Self {
        Self::for_layout(layout.as_str())
    }

    /// Start a request against a layout given by name
    pub fn for_layout(layout: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(LAYOUT_FIELD.to_string(), Value::String(layout.into()));
        Self { fields }
    }

    /// Set the action the fetch script performs
    pub fn action(self, action: Action) -> Self {
        self.field("action", action.as_str())
    }

    /// Set the callback the host answers through
    pub fn callback(self, name: impl Into<String>) -> Self {
        self.field(CALLBACK_FIELD, name.into())
    }

    /// Target a single record
    pub fn record_id(self, record_id: impl Into<String>) -> Self {
        self.field("recordId", record_id.into())
    }

    /// Attach field data for create/update actions
    pub fn data(self, data: Value) -> Self {
        self.field("fieldData", data)
    }

    /// Set an arbitrary field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Callback name, if one was set
    pub fn callback_name(&self) -> Option<&str> {
        self.fields.get(CALLBACK_FIELD).and_then(Value::as_str)
    }

    /// Build the field mapping
    pub fn build(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<CallRequest> for Map<String, Value> {
    fn from(request: CallRequest) -> Self {
        request.build()
    }
}

impl From<CallRequest> for Value {
    fn from(request: CallRequest) -> Self {
        Value::Object(request.build())
    }
}
