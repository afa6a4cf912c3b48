//! QuickBooks hand-off requests

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Customer and unbilled records to push to QuickBooks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickBooksBatch {
    #[serde(default)]
    pub cust_id: String,
    /// Flat list of record ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Value>>,
    /// Record ids grouped by project id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_by_project: Option<BTreeMap<String, Vec<Value>>>,
    /// Anything else the host script understands, passed through as is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuickBooksBatch {
    pub fn new(cust_id: impl Into<String>) -> Self {
        Self {
            cust_id: cust_id.into(),
            ..Self::default()
        }
    }

    pub fn with_records(mut self, records: Vec<Value>) -> Self {
        self.records = Some(records);
        self
    }

    pub fn with_project_records(
        mut self,
        project_id: impl Into<String>,
        records: Vec<Value>,
    ) -> Self {
        self.records_by_project
            .get_or_insert_with(BTreeMap::new)
            .insert(project_id.into(), records);
        self
    }
}

/// Either a bare customer id or a structured batch
#[derive(Debug, Clone, PartialEq)]
pub enum QuickBooksRequest {
    /// Customer id sent as the raw script parameter
    CustomerId(String),
    /// Batch sent as a JSON document
    Batch(QuickBooksBatch),
}

impl QuickBooksRequest {
    pub fn customer_id(&self) -> &str {
        match self {
            Self::CustomerId(id) => id,
            Self::Batch(batch) => &batch.cust_id,
        }
    }

    /// Script parameter for this request
    pub fn payload(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::CustomerId(id) => Ok(id.clone()),
            Self::Batch(batch) => serde_json::to_string(batch),
        }
    }
}

impl From<&str> for QuickBooksRequest {
    fn from(id: &str) -> Self {
        Self::CustomerId(id.to_string())
    }
}

impl From<String> for QuickBooksRequest {
    fn from(id: String) -> Self {
        Self::CustomerId(id)
    }
}

impl From<QuickBooksBatch> for QuickBooksRequest {
    fn from(batch: QuickBooksBatch) -> Self {
        Self::Batch(batch)
    }
}
