use crate::model::Sheet;

/// Sets the collapsed flag on every topic and subtopic. Returns whether any
/// flag actually changed.
pub fn set_all_collapsed(sheet: &mut Sheet, collapsed: bool) -> bool {
    let mut changed = false;
    for topic in &mut sheet.topics {
        changed |= topic.is_collapsed != collapsed;
        topic.is_collapsed = collapsed;
        for sub_topic in &mut topic.sub_topics {
            changed |= sub_topic.is_collapsed != collapsed;
            sub_topic.is_collapsed = collapsed;
        }
    }
    changed
}
