//! Unit tests for the task timer workflow

use chrono::{DateTime, Duration, TimeZone, Utc};
use fmbridge::core::{TimerError, TimerState};
use serde_json::json;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap() + Duration::seconds(secs)
}

#[test]
fn test_full_workday() {
    let mut timer = TimerState::new();
    timer.start("T-100", at(0));
    assert!(timer.is_active());

    // Coffee break from 10 to 25 minutes in
    timer.toggle_pause(at(600)).unwrap();
    assert!(timer.is_paused);
    timer.toggle_pause(at(1500)).unwrap();
    assert!(!timer.is_paused);

    timer.adjust(-5).unwrap();
    timer.adjust(2).unwrap();

    assert_eq!(timer.elapsed_secs(at(3600)), 3600 - 900 - 180);

    let request = timer.stop(at(3600), "Wrote the report", true).unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "recordId": "T-100",
            "description": "Wrote the report",
            "saveImmediately": true,
            "totalPauseTime": 900,
            "adjustment": -180,
        })
    );
    assert_eq!(timer, TimerState::new());
}

#[test]
fn test_stop_while_paused_counts_open_pause() {
    let mut timer = TimerState::new();
    timer.start("T-7", at(0));
    timer.toggle_pause(at(100)).unwrap();

    let request = timer.stop(at(160), "", false).unwrap();
    assert_eq!(request.total_pause_secs, 60);
    assert!(!timer.is_active());
}

#[test]
fn test_restart_discards_previous_state() {
    let mut timer = TimerState::new();
    timer.start("T-1", at(0));
    timer.adjust(30).unwrap();
    timer.toggle_pause(at(10)).unwrap();

    timer.start("T-2", at(20));
    assert_eq!(timer.record_id.as_deref(), Some("T-2"));
    assert_eq!(timer.adjustment_secs, 0);
    assert!(!timer.is_paused);
}

#[test]
fn test_stopped_timer_rejects_actions() {
    let mut timer = TimerState::new();
    timer.start("T-3", at(0));
    timer.stop(at(5), "done", false).unwrap();

    assert_eq!(timer.adjust(1), Err(TimerError::NoActiveTimer));
    assert_eq!(timer.stop(at(6), "again", false), Err(TimerError::NoActiveTimer));
}

#[test]
fn test_state_round_trips_through_storage() {
    let mut timer = TimerState::new();
    timer.start("T-9", at(0));
    timer.toggle_pause(at(30)).unwrap();

    let stored = serde_json::to_value(&timer).unwrap();
    assert_eq!(stored["recordId"], "T-9");
    assert_eq!(stored["isPaused"], true);

    let restored: TimerState = serde_json::from_value(stored).unwrap();
    assert_eq!(restored.pause_secs(at(90)), 60.0);
}
