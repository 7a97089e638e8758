//! Whole-sheet transitions: first-run seeding, import and reset.

use crate::model::{Sheet, Topic, DEFAULT_SHEET_NAME};
use tracing::{debug, info};

/// Seeds the sheet from loader output, unless the user already has data.
///
/// The first-run guard looks at questions, not topics: a sheet holding only
/// empty topics is still considered fresh. Every seeded topic and subtopic
/// starts collapsed whatever the input says.
pub fn set_initial_data(sheet: &mut Sheet, sheet_name: &str, mut topics: Vec<Topic>) -> bool {
    if sheet.has_questions() {
        debug!("set_initial_data: existing progress found, keeping it");
        return false;
    }
    for topic in &mut topics {
        topic.is_collapsed = true;
        for sub_topic in &mut topic.sub_topics {
            sub_topic.is_collapsed = true;
        }
    }
    info!(
        sheet_name,
        topics = topics.len(),
        "seeding sheet from source data"
    );
    sheet.sheet_name = sheet_name.to_string();
    sheet.topics = topics;
    true
}

/// Replaces the sheet wholesale. The payload must already be validated.
pub fn import_progress(sheet: &mut Sheet, payload: Sheet) -> bool {
    info!(
        sheet_name = %payload.sheet_name,
        topics = payload.topics.len(),
        "importing progress"
    );
    *sheet = payload;
    true
}

/// Empties the sheet back to its default name with no topics.
pub fn reset_sheet(sheet: &mut Sheet) -> bool {
    let changed = sheet.sheet_name != DEFAULT_SHEET_NAME || !sheet.topics.is_empty();
    *sheet = Sheet::default();
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, SubTopic};
    use crate::test_utils::{arrays_sheet, SheetFixture};

    fn expanded_topics() -> Vec<Topic> {
        let mut sheet = SheetFixture::new()
            .with_topic("Graphs")
            .with_sub_topic(0, "BFS")
            .with_question(0, 0, "Rotting Oranges", Difficulty::Medium)
            .build();
        sheet.topics[0].is_collapsed = false;
        sheet.topics[0].sub_topics[0].is_collapsed = false;
        sheet.topics
    }

    #[test]
    fn seeds_an_empty_sheet_collapsed() {
        let mut sheet = Sheet::default();
        assert!(set_initial_data(&mut sheet, "DSA Sheet", expanded_topics()));

        assert_eq!(sheet.sheet_name, "DSA Sheet");
        assert_eq!(sheet.question_count(), 1);
        assert!(sheet.topics[0].is_collapsed);
        assert!(sheet.topics[0].sub_topics[0].is_collapsed);
    }

    #[test]
    fn seed_does_not_clobber_progress() {
        let (mut sheet, _) = arrays_sheet();
        let snapshot = sheet.clone();
        assert!(!set_initial_data(&mut sheet, "Other", expanded_topics()));
        assert_eq!(sheet, snapshot);
    }

    #[test]
    fn topics_without_questions_still_count_as_fresh() {
        let mut sheet = SheetFixture::new()
            .with_topic("Empty")
            .with_sub_topic(0, "Nothing")
            .build();
        assert!(set_initial_data(&mut sheet, "DSA Sheet", expanded_topics()));
        assert_eq!(sheet.topics.len(), 1);
        assert_eq!(sheet.topics[0].title, "Graphs");
    }

    #[test]
    fn import_replaces_everything() {
        let (mut sheet, _) = arrays_sheet();
        let mut topic = Topic::new("Imported");
        topic.sub_topics.push(SubTopic::new("Only"));
        let payload = Sheet::new("X", vec![topic]);

        assert!(import_progress(&mut sheet, payload.clone()));
        assert_eq!(sheet, payload);
    }

    #[test]
    fn reset_returns_to_default() {
        let (mut sheet, _) = arrays_sheet();
        assert!(reset_sheet(&mut sheet));
        assert_eq!(sheet, Sheet::default());
        assert!(!reset_sheet(&mut sheet));
    }
}
