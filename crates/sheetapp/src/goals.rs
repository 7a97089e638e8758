//! Study goals: a flat checklist kept next to the sheet.
//!
//! Goals are unrelated to questions and are stored under their own key, so a
//! corrupt goal list never affects sheet progress. New goals go on top.

use crate::model::new_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    /// Epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

/// Prepends a goal. Returns its id, or `None` when the text is blank.
pub fn add_goal(goals: &mut Vec<GoalItem>, text: &str, now: DateTime<Utc>) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let id = new_id();
    goals.insert(
        0,
        GoalItem {
            id: id.clone(),
            text: text.to_string(),
            done: false,
            created_at: now.timestamp_millis(),
        },
    );
    Some(id)
}

pub fn toggle_goal(goals: &mut [GoalItem], id: &str) -> bool {
    match goals.iter_mut().find(|g| g.id == id) {
        Some(goal) => {
            goal.done = !goal.done;
            true
        }
        None => false,
    }
}

pub fn delete_goal(goals: &mut Vec<GoalItem>, id: &str) -> bool {
    let before = goals.len();
    goals.retain(|g| g.id != id);
    goals.len() != before
}

/// Drops every finished goal and returns how many were removed.
pub fn clear_completed(goals: &mut Vec<GoalItem>) -> usize {
    let before = goals.len();
    goals.retain(|g| !g.done);
    before - goals.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_prepends() {
        let mut goals = Vec::new();
        let now = Utc::now();
        add_goal(&mut goals, "first", now).unwrap();
        let id = add_goal(&mut goals, "  revise graphs  ", now).unwrap();

        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].id, id);
        assert_eq!(goals[0].text, "revise graphs");
        assert!(!goals[0].done);
        assert_eq!(goals[0].created_at, now.timestamp_millis());
    }

    #[test]
    fn blank_goal_is_rejected() {
        let mut goals = Vec::new();
        assert!(add_goal(&mut goals, "   ", Utc::now()).is_none());
        assert!(goals.is_empty());
    }

    #[test]
    fn toggle_delete_and_clear() {
        let mut goals = Vec::new();
        let a = add_goal(&mut goals, "a", Utc::now()).unwrap();
        let b = add_goal(&mut goals, "b", Utc::now()).unwrap();
        add_goal(&mut goals, "c", Utc::now()).unwrap();

        assert!(toggle_goal(&mut goals, &a));
        assert!(toggle_goal(&mut goals, &b));
        assert!(!toggle_goal(&mut goals, "ghost"));
        assert_eq!(clear_completed(&mut goals), 2);
        assert_eq!(goals.len(), 1);

        let c = goals[0].id.clone();
        assert!(delete_goal(&mut goals, &c));
        assert!(!delete_goal(&mut goals, &c));
        assert!(goals.is_empty());
    }

    #[test]
    fn reads_camel_case_layout() {
        let json = r#"[{"id":"g1","text":"mock interview","done":true,"createdAt":1700000000000}]"#;
        let goals: Vec<GoalItem> = serde_json::from_str(json).unwrap();
        assert_eq!(goals[0].created_at, 1_700_000_000_000);
        assert!(goals[0].done);
    }
}
