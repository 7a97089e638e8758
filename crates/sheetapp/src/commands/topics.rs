use crate::model::{Sheet, Topic};
use tracing::debug;

/// Appends a new, collapsed topic and returns its id.
pub fn add_topic(sheet: &mut Sheet, title: &str) -> String {
    let topic = Topic::new(title);
    let id = topic.id.clone();
    sheet.topics.push(topic);
    id
}

pub fn edit_topic(sheet: &mut Sheet, topic_id: &str, title: &str) -> bool {
    match sheet.topic_mut(topic_id) {
        Some(topic) => {
            topic.title = title.to_string();
            true
        }
        None => {
            debug!(topic_id, "edit_topic: topic not found");
            false
        }
    }
}

/// Removes the topic together with every subtopic and question it owns.
pub fn delete_topic(sheet: &mut Sheet, topic_id: &str) -> bool {
    let before = sheet.topics.len();
    sheet.topics.retain(|t| t.id != topic_id);
    let removed = sheet.topics.len() != before;
    if !removed {
        debug!(topic_id, "delete_topic: topic not found");
    }
    removed
}

pub fn toggle_collapse(sheet: &mut Sheet, topic_id: &str) -> bool {
    match sheet.topic_mut(topic_id) {
        Some(topic) => {
            topic.is_collapsed = !topic.is_collapsed;
            true
        }
        None => {
            debug!(topic_id, "toggle_collapse: topic not found");
            false
        }
    }
}
