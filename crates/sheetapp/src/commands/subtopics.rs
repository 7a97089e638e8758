use crate::model::{Sheet, SubTopic};
use tracing::debug;

/// Appends a collapsed subtopic to the topic. Returns the new id, or `None`
/// when the topic does not exist.
pub fn add_sub_topic(sheet: &mut Sheet, topic_id: &str, title: &str) -> Option<String> {
    let Some(topic) = sheet.topic_mut(topic_id) else {
        debug!(topic_id, "add_sub_topic: topic not found");
        return None;
    };
    let sub_topic = SubTopic::new(title);
    let id = sub_topic.id.clone();
    topic.sub_topics.push(sub_topic);
    Some(id)
}

pub fn edit_sub_topic(sheet: &mut Sheet, topic_id: &str, sub_topic_id: &str, title: &str) -> bool {
    match sheet.sub_topic_mut(topic_id, sub_topic_id) {
        Some(st) => {
            st.title = title.to_string();
            true
        }
        None => {
            debug!(topic_id, sub_topic_id, "edit_sub_topic: not found");
            false
        }
    }
}

/// Removes the subtopic and all of its questions.
pub fn delete_sub_topic(sheet: &mut Sheet, topic_id: &str, sub_topic_id: &str) -> bool {
    let Some(topic) = sheet.topic_mut(topic_id) else {
        debug!(topic_id, "delete_sub_topic: topic not found");
        return false;
    };
    let before = topic.sub_topics.len();
    topic.sub_topics.retain(|st| st.id != sub_topic_id);
    topic.sub_topics.len() != before
}

pub fn toggle_collapse_sub_topic(sheet: &mut Sheet, topic_id: &str, sub_topic_id: &str) -> bool {
    match sheet.sub_topic_mut(topic_id, sub_topic_id) {
        Some(st) => {
            st.is_collapsed = !st.is_collapsed;
            true
        }
        None => {
            debug!(topic_id, sub_topic_id, "toggle_collapse_sub_topic: not found");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use crate::test_utils::SheetFixture;

    #[test]
    fn add_sub_topic_appends_collapsed() {
        let mut sheet = SheetFixture::new()
            .with_topic("Graphs")
            .with_sub_topic(0, "BFS")
            .build();
        let topic_id = sheet.topics[0].id.clone();

        let id = add_sub_topic(&mut sheet, &topic_id, "DFS").unwrap();
        let subs = &sheet.topics[0].sub_topics;
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[1].id, id);
        assert_eq!(subs[1].title, "DFS");
        assert!(subs[1].is_collapsed);
        assert!(subs[1].questions.is_empty());
    }

    #[test]
    fn add_sub_topic_to_missing_topic_is_noop() {
        let mut sheet = SheetFixture::new().with_topic("Graphs").build();
        assert!(add_sub_topic(&mut sheet, "ghost", "DFS").is_none());
        assert!(sheet.topics[0].sub_topics.is_empty());
    }

    #[test]
    fn edit_and_toggle_are_scoped_to_parent() {
        let mut sheet = SheetFixture::new()
            .with_topic("A")
            .with_sub_topic(0, "One")
            .with_topic("B")
            .build();
        let a = sheet.topics[0].id.clone();
        let b = sheet.topics[1].id.clone();
        let st = sheet.topics[0].sub_topics[0].id.clone();

        // Wrong parent: nothing happens.
        assert!(!edit_sub_topic(&mut sheet, &b, &st, "Renamed"));
        assert!(!toggle_collapse_sub_topic(&mut sheet, &b, &st));

        assert!(edit_sub_topic(&mut sheet, &a, &st, "Renamed"));
        assert!(toggle_collapse_sub_topic(&mut sheet, &a, &st));
        let sub = &sheet.topics[0].sub_topics[0];
        assert_eq!(sub.title, "Renamed");
        assert!(!sub.is_collapsed);
    }

    #[test]
    fn delete_sub_topic_drops_questions() {
        let mut sheet = SheetFixture::new()
            .with_topic("A")
            .with_sub_topic(0, "One")
            .with_sub_topic(0, "Two")
            .with_question(0, 0, "Q", Difficulty::Easy)
            .build();
        let a = sheet.topics[0].id.clone();
        let one = sheet.topics[0].sub_topics[0].id.clone();

        assert!(delete_sub_topic(&mut sheet, &a, &one));
        assert_eq!(sheet.topics[0].sub_topics.len(), 1);
        assert_eq!(sheet.topics[0].sub_topics[0].title, "Two");
        assert!(!sheet.has_questions());
        assert!(!delete_sub_topic(&mut sheet, &a, &one));
    }
}
