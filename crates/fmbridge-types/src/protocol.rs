//! Wire constants and named layouts/actions understood by the host scripts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol tag stamped on every outgoing request
pub const PROTOCOL_VERSION: &str = "vLatest";

/// Discriminator of the message that hands over the host object
pub const BRIDGE_READY: &str = "FM_BRIDGE_READY";

/// Host script serving every data call
pub const FETCH_SCRIPT: &str = "JS * Fetch Data";

/// Host script that starts QuickBooks processing for a customer
pub const QUICKBOOKS_SCRIPT: &str = "Initialize QB via JS";

/// Callback names whose payload is delivered later through the host callback
pub const RETURN_RECORDS: &str = "returnRecords";
pub const RETURN_CONTEXT: &str = "returnContext";

pub const LAYOUT_FIELD: &str = "layout";
pub const LAYOUTS_ALIAS_FIELD: &str = "layouts";
pub const VERSION_FIELD: &str = "version";
pub const CALLBACK_FIELD: &str = "callBackName";

/// FileMaker layouts the application reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    #[serde(rename = "devCustomers")]
    Customers,
    #[serde(rename = "devProjects")]
    Projects,
    #[serde(rename = "devTasks")]
    Tasks,
    #[serde(rename = "dapiRecords")]
    Records,
    #[serde(rename = "devNotes")]
    Notes,
    #[serde(rename = "devLinks")]
    Links,
    #[serde(rename = "devImages")]
    Images,
    #[serde(rename = "devProjectImages")]
    ProjectImages,
    #[serde(rename = "devProjectLinks")]
    ProjectLinks,
    #[serde(rename = "devProjectObjectives")]
    ProjectObjectives,
    #[serde(rename = "devProjectObjSteps")]
    ProjectObjSteps,
}

impl Layout {
    /// Every layout, in declaration order
    pub const ALL: [Layout; 11] = [
        Layout::Customers,
        Layout::Projects,
        Layout::Tasks,
        Layout::Records,
        Layout::Notes,
        Layout::Links,
        Layout::Images,
        Layout::ProjectImages,
        Layout::ProjectLinks,
        Layout::ProjectObjectives,
        Layout::ProjectObjSteps,
    ];

    /// Layout name as FileMaker knows it
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customers => "devCustomers",
            Self::Projects => "devProjects",
            Self::Tasks => "devTasks",
            Self::Records => "dapiRecords",
            Self::Notes => "devNotes",
            Self::Links => "devLinks",
            Self::Images => "devImages",
            Self::ProjectImages => "devProjectImages",
            Self::ProjectLinks => "devProjectLinks",
            Self::ProjectObjectives => "devProjectObjectives",
            Self::ProjectObjSteps => "devProjectObjSteps",
        }
    }

    /// Look a layout up by its FileMaker name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layout| layout.as_str() == name)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations the fetch script dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    MetaData,
    Duplicate,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::MetaData => "metaData",
            Self::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
