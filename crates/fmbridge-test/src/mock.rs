//! Mock host object for testing

use async_trait::async_trait;
use fmbridge_bridge::FileMakerHost;
use fmbridge_core::HostError;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Which host entry point a call went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStyle {
    Direct,
    Async,
}

/// A script call the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub script: String,
    pub param: String,
    pub style: CallStyle,
}

impl RecordedCall {
    /// The parameter parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.param)
            .unwrap_or_else(|e| panic!("script parameter is not JSON ({e}): {}", self.param))
    }
}

/// What the mock answers with
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedResponse {
    /// Return this raw result
    Raw(Option<String>),
    /// Fail with this host error
    Fail(HostError),
}

/// Host object double that records every call and replays scripted answers.
///
/// Queued responses are used first; once the queue is empty every call gets
/// the fallback response (`{"ok":true}` unless changed).
pub struct MockHost {
    entry_point: AtomicBool,
    async_delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<RecordedCall>>,
    queued: Mutex<VecDeque<ScriptedResponse>>,
    fallback: Mutex<ScriptedResponse>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            entry_point: AtomicBool::new(true),
            async_delay: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            queued: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(ScriptedResponse::Raw(Some(r#"{"ok":true}"#.to_string()))),
        }
    }

    /// A host object whose script entry point is not installed yet
    pub fn without_entry_point() -> Self {
        let host = Self::new();
        host.set_entry_point(false);
        host
    }

    pub fn set_entry_point(&self, present: bool) {
        self.entry_point.store(present, Ordering::SeqCst);
    }

    /// Delay async calls by this long before answering
    pub fn set_async_delay(&self, delay: Duration) {
        *self.async_delay.lock().unwrap() = Some(delay);
    }

    /// Queue a JSON answer
    pub fn respond_with(&self, value: Value) -> &Self {
        self.push(ScriptedResponse::Raw(Some(value.to_string())))
    }

    /// Queue a raw answer, `None` for no result at all
    pub fn respond_raw(&self, raw: Option<&str>) -> &Self {
        self.push(ScriptedResponse::Raw(raw.map(str::to_string)))
    }

    /// Queue a host failure
    pub fn fail_with(&self, message: &str) -> &Self {
        self.push(ScriptedResponse::Fail(HostError::new(message)))
    }

    /// Answer every unscripted call with this
    pub fn set_fallback(&self, response: ScriptedResponse) {
        *self.fallback.lock().unwrap() = response;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn push(&self, response: ScriptedResponse) -> &Self {
        self.queued.lock().unwrap().push_back(response);
        self
    }

    fn answer(&self, script: &str, param: &str, style: CallStyle) -> Result<Option<String>, HostError> {
        self.calls.lock().unwrap().push(RecordedCall {
            script: script.to_string(),
            param: param.to_string(),
            style,
        });

        let response = self
            .queued
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.lock().unwrap().clone());

        match response {
            ScriptedResponse::Raw(raw) => Ok(raw),
            ScriptedResponse::Fail(err) => Err(err),
        }
    }
}

#[async_trait]
impl FileMakerHost for MockHost {
    fn can_perform_script(&self) -> bool {
        self.entry_point.load(Ordering::SeqCst)
    }

    fn perform_script(&self, script: &str, param: &str) -> Result<Option<String>, HostError> {
        self.answer(script, param, CallStyle::Direct)
    }

    async fn perform_script_async(
        &self,
        script: &str,
        param: &str,
    ) -> Result<Option<String>, HostError> {
        let delay = *self.async_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.answer(script, param, CallStyle::Async)
    }
}
