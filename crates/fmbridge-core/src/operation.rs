//! Uniform error shape for FileMaker operations

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use thiserror::Error;
use tracing::error;

use crate::error::{ErrorCode, ErrorKind};

/// Failure of a wrapped operation, in the shape views render.
///
/// Serializes as `{ "error": true, "code": "...", "message": "...", "details": ... }`.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct OperationFailure {
    /// Always `true`; lets views test the shape without matching on types
    pub error: bool,
    pub code: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl OperationFailure {
    /// Normalize any coded error
    pub fn from_error<E: ErrorCode + ?Sized>(err: &E) -> Self {
        Self {
            error: true,
            code: err.code().unwrap_or(ErrorKind::UnknownError),
            message: err.to_string(),
            details: err.details().cloned(),
        }
    }
}

impl ErrorCode for OperationFailure {
    fn code(&self) -> Option<ErrorKind> {
        Some(self.code)
    }

    fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

/// Run an operation and normalize whatever it fails with.
///
/// Successes pass through untouched. Failures are logged and returned as an
/// [`OperationFailure`]; nothing is swallowed.
pub async fn handle_filemaker_operation<F, Fut, T, E>(operation: F) -> Result<T, OperationFailure>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: ErrorCode,
{
    operation().await.map_err(|err| {
        let failure = OperationFailure::from_error(&err);
        error!(
            code = %failure.code,
            details = ?failure.details,
            "FileMaker operation failed: {}",
            failure.message
        );
        failure
    })
}
