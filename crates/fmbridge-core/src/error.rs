//! Error types for the FileMaker bridge

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Stable error codes reported to callers.
///
/// The serialized form is the code string front ends switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Host object never became available
    Timeout,
    /// Host script invocation threw or rejected
    ScriptError,
    /// Host returned an empty payload
    NullResult,
    /// Payload carried an explicit error flag
    FmError,
    /// Request formatting or serialization failed
    PreparationError,
    /// Host object absent at call time
    FmUnavailable,
    /// QuickBooks initialization failed
    QbInitError,
    /// No code was set
    UnknownError,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "TIMEOUT",
            Self::ScriptError => "SCRIPT_ERROR",
            Self::NullResult => "NULL_RESULT",
            Self::FmError => "FM_ERROR",
            Self::PreparationError => "PREPARATION_ERROR",
            Self::FmUnavailable => "FM_UNAVAILABLE",
            Self::QbInitError => "QB_INIT_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by the host while running a script
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct HostError {
    message: String,
    details: Option<Value>,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    /// Attach host-specific details
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

/// Caller-side input problems, detected before the host is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required fields absent or falsy
    #[error("Missing required parameters: {}", .missing.join(", "))]
    MissingParams {
        /// Names of the missing fields, in the order they were required
        missing: Vec<String>,
    },

    #[error("Customer ID is required for QuickBooks initialization")]
    MissingCustomerId,
}

/// Main error type for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Host object did not appear within the wait budget
    #[error("FileMaker object is unavailable after {waited_secs} seconds")]
    Timeout {
        /// Attempts made before giving up
        attempts: u32,
        /// Total time spent waiting
        waited_secs: f64,
    },

    /// Host script threw or rejected
    #[error("{message}")]
    Script {
        message: String,
        /// The error exactly as the host reported it
        #[source]
        source: HostError,
    },

    /// Host answered with nothing
    #[error("FileMaker returned null result")]
    NullResult,

    /// Host answered with an error payload
    #[error("{message}")]
    FileMaker {
        message: String,
        details: Option<Value>,
    },

    /// Request could not be prepared for transport
    #[error("Error preparing FileMaker request: {source}")]
    Preparation {
        #[source]
        source: serde_json::Error,
    },

    /// Host object absent where no waiting is done
    #[error("FileMaker object is unavailable")]
    Unavailable,

    /// QuickBooks initialization failed after the host was found
    #[error("{message}")]
    QuickBooksInit {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Host answered with something that is not JSON
    #[error("Invalid FileMaker response: {0}")]
    Parse(#[source] serde_json::Error),

    /// Script ran but its result could not be read
    #[error("Invalid FileMaker response: {source}")]
    MalformedResult {
        #[source]
        source: serde_json::Error,
    },

    /// Caller input was rejected
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

impl BridgeError {
    /// Create a Timeout error from the attempts made and the delay between them
    pub fn timeout(attempts: u32, interval: std::time::Duration) -> Self {
        Self::Timeout {
            attempts,
            waited_secs: interval
                .checked_mul(attempts)
                .unwrap_or(std::time::Duration::MAX)
                .as_secs_f64(),
        }
    }

    /// Reclassify a failure to read a script result as a script error.
    ///
    /// Other errors pass through unchanged.
    pub fn into_script_failure(self) -> Self {
        match self {
            Self::Parse(source) => Self::MalformedResult { source },
            other => other,
        }
    }

    /// Wrap a host failure as a script error
    pub fn script(source: HostError) -> Self {
        Self::Script {
            message: source.message().to_string(),
            source,
        }
    }

    /// Create a FileMaker error from a payload message
    pub fn filemaker(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::FileMaker {
            message: message.into(),
            details,
        }
    }

    /// Wrap any failure as a QuickBooks initialization error
    pub fn quickbooks_init<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::QuickBooksInit {
            message: source.to_string(),
            source: Box::new(source),
        }
    }

    /// Error code, `None` for failures that carry no classification
    pub fn code(&self) -> Option<ErrorKind> {
        match self {
            Self::Timeout { .. } => Some(ErrorKind::Timeout),
            Self::Script { .. } | Self::MalformedResult { .. } => Some(ErrorKind::ScriptError),
            Self::NullResult => Some(ErrorKind::NullResult),
            Self::FileMaker { .. } => Some(ErrorKind::FmError),
            Self::Preparation { .. } => Some(ErrorKind::PreparationError),
            Self::Unavailable => Some(ErrorKind::FmUnavailable),
            Self::QuickBooksInit { .. } => Some(ErrorKind::QbInitError),
            Self::Parse(_) | Self::Invalid(_) => None,
        }
    }

    /// Error code, falling back to [`ErrorKind::UnknownError`]
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.code().unwrap_or(ErrorKind::UnknownError)
    }

    /// Details attached by the host, if any
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::FileMaker { details, .. } => details.as_ref(),
            Self::Script { source, .. } => source.details(),
            _ => None,
        }
    }

    /// Whether waiting longer could have changed the outcome
    #[inline]
    pub fn is_host_missing(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unavailable)
    }

    /// Returns a user-friendly error message.
    pub fn user_message(&self) -> Cow<'static, str> {
        match self.kind() {
            ErrorKind::Timeout | ErrorKind::FmUnavailable => {
                "FileMaker is not ready yet. Please try again.".into()
            }
            ErrorKind::FmError => self.to_string().into(),
            ErrorKind::QbInitError => "QuickBooks could not be started".into(),
            _ => "Something went wrong talking to FileMaker".into(),
        }
    }
}

/// Read the code and details of an error, whatever its type.
///
/// Errors that carry no code report `None` and end up as
/// [`ErrorKind::UnknownError`] once normalized.
pub trait ErrorCode: std::error::Error {
    fn code(&self) -> Option<ErrorKind> {
        None
    }

    fn details(&self) -> Option<&Value> {
        None
    }
}

impl ErrorCode for BridgeError {
    fn code(&self) -> Option<ErrorKind> {
        BridgeError::code(self)
    }

    fn details(&self) -> Option<&Value> {
        BridgeError::details(self)
    }
}

impl ErrorCode for HostError {
    fn details(&self) -> Option<&Value> {
        HostError::details(self)
    }
}

impl ErrorCode for ValidationError {}

impl ErrorCode for serde_json::Error {}
