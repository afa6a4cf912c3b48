//! Time tracking state for task timers
//!
//! A timer is idle until started against a timer record, can be paused and
//! resumed any number of times, accepts manual adjustments, and goes back to
//! idle when stopped. Stopping yields the request the host needs to close
//! the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timer operations that need a running timer
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    #[error("No active timer")]
    NoActiveTimer,
}

/// State of the task timer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Host record the timer writes to, `None` when idle
    pub record_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub is_paused: bool,
    pub pause_started_at: Option<DateTime<Utc>>,
    /// Seconds spent in completed pauses
    pub total_pause_secs: f64,
    /// Manual correction in seconds, may be negative
    pub adjustment_secs: i64,
}

/// Parameters for closing a timer record on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStopRequest {
    pub record_id: String,
    pub description: String,
    pub save_immediately: bool,
    /// Whole seconds paused, including a pause still open at stop time
    #[serde(rename = "totalPauseTime")]
    pub total_pause_secs: i64,
    #[serde(rename = "adjustment")]
    pub adjustment_secs: i64,
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

impl TimerState {
    /// An idle timer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.record_id.is_some()
    }

    /// Start timing against a record, discarding any previous state
    pub fn start(&mut self, record_id: impl Into<String>, now: DateTime<Utc>) {
        *self = Self {
            record_id: Some(record_id.into()),
            started_at: Some(now),
            ..Self::default()
        };
    }

    /// Pause a running timer or resume a paused one
    pub fn toggle_pause(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        self.ensure_active()?;

        if self.is_paused {
            if let Some(pause_start) = self.pause_started_at.take() {
                self.total_pause_secs += seconds_between(pause_start, now);
            }
            self.is_paused = false;
        } else {
            self.is_paused = true;
            self.pause_started_at = Some(now);
        }
        Ok(())
    }

    /// Add (or with a negative value, remove) whole minutes
    pub fn adjust(&mut self, minutes: i64) -> Result<(), TimerError> {
        self.ensure_active()?;
        self.adjustment_secs = self
            .adjustment_secs
            .saturating_add(minutes.saturating_mul(60));
        Ok(())
    }

    /// Seconds paused so far, counting an open pause up to `now`
    pub fn pause_secs(&self, now: DateTime<Utc>) -> f64 {
        let open = match (self.is_paused, self.pause_started_at) {
            (true, Some(pause_start)) => seconds_between(pause_start, now),
            _ => 0.0,
        };
        self.total_pause_secs + open
    }

    /// Whole seconds worked, pauses excluded and adjustment included
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let running = seconds_between(started_at, now) - self.pause_secs(now);
        (running.round() as i64).saturating_add(self.adjustment_secs)
    }

    /// Stop the timer, returning the request that closes its record.
    ///
    /// The timer is idle afterwards.
    pub fn stop(
        &mut self,
        now: DateTime<Utc>,
        description: impl Into<String>,
        save_immediately: bool,
    ) -> Result<TimerStopRequest, TimerError> {
        let record_id = self.record_id.clone().ok_or(TimerError::NoActiveTimer)?;
        let request = TimerStopRequest {
            record_id,
            description: description.into(),
            save_immediately,
            total_pause_secs: self.pause_secs(now).round() as i64,
            adjustment_secs: self.adjustment_secs,
        };
        *self = Self::default();
        Ok(request)
    }

    fn ensure_active(&self) -> Result<(), TimerError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(TimerError::NoActiveTimer)
        }
    }
}
