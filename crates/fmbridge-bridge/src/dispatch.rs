//! How a call reaches the host

use fmbridge_types::{RETURN_CONTEXT, RETURN_RECORDS};

/// The three ways a formatted request is handed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStyle {
    /// Fire and forget; the payload comes back through the host callback
    Deferred,
    /// Awaitable wrapper, result normalized when it resolves
    Awaited,
    /// Direct call, result normalized on return
    Direct,
}

impl DispatchStyle {
    /// Pick the style for a request's callback name and async flag.
    ///
    /// Callback-delivered requests are always deferred, whatever the flag.
    pub fn select(callback: Option<&str>, is_async: bool) -> Self {
        match callback {
            Some(RETURN_RECORDS | RETURN_CONTEXT) => Self::Deferred,
            _ if is_async => Self::Awaited,
            _ => Self::Direct,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deferred => "deferred",
            Self::Awaited => "awaited",
            Self::Direct => "direct",
        }
    }
}
