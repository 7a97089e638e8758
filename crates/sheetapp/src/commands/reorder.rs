//! Reordering within a parent, at all three levels.
//!
//! Each operation validates both indices against the current sequence and
//! then swaps in the result of [`move_item`]. Equal or out-of-range indices
//! leave the sheet untouched.

use crate::model::Sheet;
use crate::ordering::{is_valid_move, move_item};
use tracing::debug;

pub fn reorder_topics(sheet: &mut Sheet, from: usize, to: usize) -> bool {
    if !is_valid_move(sheet.topics.len(), from, to) {
        debug!(from, to, "reorder_topics: ignored");
        return false;
    }
    sheet.topics = move_item(&sheet.topics, from, to);
    true
}

pub fn reorder_sub_topics(sheet: &mut Sheet, topic_id: &str, from: usize, to: usize) -> bool {
    let Some(topic) = sheet.topic_mut(topic_id) else {
        debug!(topic_id, "reorder_sub_topics: topic not found");
        return false;
    };
    if !is_valid_move(topic.sub_topics.len(), from, to) {
        debug!(topic_id, from, to, "reorder_sub_topics: ignored");
        return false;
    }
    topic.sub_topics = move_item(&topic.sub_topics, from, to);
    true
}

pub fn reorder_questions(
    sheet: &mut Sheet,
    topic_id: &str,
    sub_topic_id: &str,
    from: usize,
    to: usize,
) -> bool {
    let Some(sub_topic) = sheet.sub_topic_mut(topic_id, sub_topic_id) else {
        debug!(topic_id, sub_topic_id, "reorder_questions: subtopic not found");
        return false;
    };
    if !is_valid_move(sub_topic.questions.len(), from, to) {
        debug!(sub_topic_id, from, to, "reorder_questions: ignored");
        return false;
    }
    sub_topic.questions = move_item(&sub_topic.questions, from, to);
    true
}
