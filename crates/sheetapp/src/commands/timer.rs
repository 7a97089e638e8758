//! Timer transitions and the completion toggle.
//!
//! A question's timer is either idle or running since `timer_started_at`.
//! There is no pause: stopping means "finished" and marks the question
//! completed. All transitions take `now` from the caller.

use crate::commands::questions::with_question;
use crate::model::{QuestionRef, Sheet};
use chrono::{DateTime, Utc};

/// Starts the timer. On an already running timer this re-stamps the start
/// time, dropping the time of the current run.
pub fn start_timer(sheet: &mut Sheet, r: &QuestionRef, now: DateTime<Utc>) -> bool {
    with_question(sheet, r, "start_timer", |q| {
        q.is_timer_running = true;
        q.timer_started_at = Some(now);
        true
    })
}

/// Stops the timer, adds whole elapsed seconds to `time_spent` and marks the
/// question completed. A clock running backwards contributes zero.
pub fn stop_timer(sheet: &mut Sheet, r: &QuestionRef, now: DateTime<Utc>) -> bool {
    with_question(sheet, r, "stop_timer", |q| {
        let elapsed = q
            .timer_started_at
            .map(|started| (now - started).num_seconds().max(0) as u64)
            .unwrap_or(0);
        q.time_spent = q.time_spent.saturating_add(elapsed);
        q.is_timer_running = false;
        q.timer_started_at = None;
        q.is_completed = true;
        true
    })
}

/// Zeroes accumulated time and restarts the timer from `now`.
pub fn reset_timer(sheet: &mut Sheet, r: &QuestionRef, now: DateTime<Utc>) -> bool {
    with_question(sheet, r, "reset_timer", |q| {
        q.time_spent = 0;
        q.is_timer_running = true;
        q.timer_started_at = Some(now);
        true
    })
}

/// Flips completion. Marking a question incomplete also erases its
/// accumulated time and stops any running timer.
pub fn toggle_complete(sheet: &mut Sheet, r: &QuestionRef) -> bool {
    with_question(sheet, r, "toggle_complete", |q| {
        q.is_completed = !q.is_completed;
        if !q.is_completed {
            q.time_spent = 0;
            q.is_timer_running = false;
            q.timer_started_at = None;
        }
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::arrays_sheet;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn start_then_stop_accumulates_and_completes() {
        let (mut sheet, [easy, _]) = arrays_sheet();
        sheet.question_mut(&easy).unwrap().time_spent = 10;

        assert!(start_timer(&mut sheet, &easy, t0()));
        let q = sheet.question(&easy).unwrap();
        assert!(q.is_timer_running);
        assert_eq!(q.timer_started_at, Some(t0()));

        assert!(stop_timer(&mut sheet, &easy, t0() + Duration::seconds(5)));
        let q = sheet.question(&easy).unwrap();
        assert_eq!(q.time_spent, 15);
        assert!(q.is_completed);
        assert!(!q.is_timer_running);
        assert!(q.timer_started_at.is_none());
    }

    #[test]
    fn stop_truncates_partial_seconds() {
        let (mut sheet, [easy, _]) = arrays_sheet();
        start_timer(&mut sheet, &easy, t0());
        stop_timer(&mut sheet, &easy, t0() + Duration::milliseconds(2_900));
        assert_eq!(sheet.question(&easy).unwrap().time_spent, 2);
    }

    #[test]
    fn stop_without_start_still_completes() {
        let (mut sheet, [easy, _]) = arrays_sheet();
        assert!(stop_timer(&mut sheet, &easy, t0()));
        let q = sheet.question(&easy).unwrap();
        assert_eq!(q.time_spent, 0);
        assert!(q.is_completed);
    }

    #[test]
    fn stop_with_clock_skew_adds_nothing() {
        let (mut sheet, [_, hard]) = arrays_sheet();
        start_timer(&mut sheet, &hard, t0());
        stop_timer(&mut sheet, &hard, t0() - Duration::seconds(30));
        assert_eq!(sheet.question(&hard).unwrap().time_spent, 125);
    }

    #[test]
    fn stop_saturates_accumulated_time() {
        let (mut sheet, [easy, _]) = arrays_sheet();
        sheet.question_mut(&easy).unwrap().time_spent = u64::MAX;
        start_timer(&mut sheet, &easy, t0());
        assert!(stop_timer(&mut sheet, &easy, t0() + Duration::seconds(10)));
        let q = sheet.question(&easy).unwrap();
        assert_eq!(q.time_spent, u64::MAX);
        assert!(q.is_completed);
    }

    #[test]
    fn start_on_running_timer_restamps() {
        let (mut sheet, [easy, _]) = arrays_sheet();
        start_timer(&mut sheet, &easy, t0());
        let later = t0() + Duration::seconds(40);
        start_timer(&mut sheet, &easy, later);
        assert_eq!(sheet.question(&easy).unwrap().timer_started_at, Some(later));

        stop_timer(&mut sheet, &easy, later + Duration::seconds(3));
        assert_eq!(sheet.question(&easy).unwrap().time_spent, 3);
    }

    #[test]
    fn reset_restarts_from_zero() {
        let (mut sheet, [_, hard]) = arrays_sheet();
        assert!(reset_timer(&mut sheet, &hard, t0()));
        let q = sheet.question(&hard).unwrap();
        assert_eq!(q.time_spent, 0);
        assert!(q.is_timer_running);
        assert_eq!(q.timer_started_at, Some(t0()));
    }

    #[test]
    fn uncomplete_erases_timing() {
        let (mut sheet, [_, hard]) = arrays_sheet();
        start_timer(&mut sheet, &hard, t0());

        assert!(toggle_complete(&mut sheet, &hard));
        let q = sheet.question(&hard).unwrap();
        assert!(!q.is_completed);
        assert_eq!(q.time_spent, 0);
        assert!(!q.is_timer_running);
        assert!(q.timer_started_at.is_none());
    }

    #[test]
    fn complete_leaves_timing_alone() {
        let (mut sheet, [easy, _]) = arrays_sheet();
        sheet.question_mut(&easy).unwrap().time_spent = 42;
        start_timer(&mut sheet, &easy, t0());

        assert!(toggle_complete(&mut sheet, &easy));
        let q = sheet.question(&easy).unwrap();
        assert!(q.is_completed);
        assert_eq!(q.time_spent, 42);
        assert!(q.is_timer_running);
        assert_eq!(q.timer_started_at, Some(t0()));
    }

    #[test]
    fn missing_question_is_noop() {
        let (mut sheet, [easy, _]) = arrays_sheet();
        let mut stale = easy.clone();
        stale.question_id = "gone".into();
        let snapshot = sheet.clone();

        assert!(!start_timer(&mut sheet, &stale, t0()));
        assert!(!stop_timer(&mut sheet, &stale, t0()));
        assert!(!reset_timer(&mut sheet, &stale, t0()));
        assert!(!toggle_complete(&mut sheet, &stale));
        assert_eq!(sheet, snapshot);
    }
}
