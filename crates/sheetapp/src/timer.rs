//! Read-side view of question timers.
//!
//! Transitions live in [`crate::commands::timer`]. This module only derives
//! what to display; a ticking clock never writes back into the model.

use crate::model::Question;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running { started_at: DateTime<Utc> },
}

impl TimerState {
    pub fn of(question: &Question) -> Self {
        match (question.is_timer_running, question.timer_started_at) {
            (true, Some(started_at)) => TimerState::Running { started_at },
            _ => TimerState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }
}

/// Accumulated seconds plus the current run, if any.
pub fn live_elapsed(question: &Question, now: DateTime<Utc>) -> u64 {
    match TimerState::of(question) {
        TimerState::Running { started_at } => {
            let run = (now - started_at).num_seconds().max(0) as u64;
            question.time_spent.saturating_add(run)
        }
        TimerState::Idle => question.time_spent,
    }
}

/// Formats seconds as `Mm SSs`, e.g. `2m 05s`. Minutes are not rolled into hours.
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}
