use crate::model::{new_id, NewQuestion, Question, QuestionRef, Sheet};
use tracing::debug;

/// Appends a question with fresh progress state. Returns its id, or `None`
/// when the topic or subtopic does not exist.
pub fn add_question(
    sheet: &mut Sheet,
    topic_id: &str,
    sub_topic_id: &str,
    data: NewQuestion,
) -> Option<String> {
    let Some(sub_topic) = sheet.sub_topic_mut(topic_id, sub_topic_id) else {
        debug!(topic_id, sub_topic_id, "add_question: subtopic not found");
        return None;
    };
    let id = new_id();
    sub_topic.questions.push(Question::from_new(id.clone(), data));
    Some(id)
}

/// Applies `update` to the referenced question. Shared by every per-question
/// command; a missing target is logged and reported as `false`.
pub(crate) fn with_question<F>(sheet: &mut Sheet, r: &QuestionRef, op: &str, update: F) -> bool
where
    F: FnOnce(&mut Question) -> bool,
{
    match sheet.question_mut(r) {
        Some(q) => update(q),
        None => {
            debug!(question_id = %r.question_id, op, "question not found");
            false
        }
    }
}

pub fn edit_question(sheet: &mut Sheet, r: &QuestionRef, title: &str) -> bool {
    with_question(sheet, r, "edit_question", |q| {
        q.title = title.to_string();
        true
    })
}

pub fn delete_question(sheet: &mut Sheet, r: &QuestionRef) -> bool {
    let Some(sub_topic) = sheet.sub_topic_mut(&r.topic_id, &r.sub_topic_id) else {
        debug!(question_id = %r.question_id, "delete_question: subtopic not found");
        return false;
    };
    let before = sub_topic.questions.len();
    sub_topic.questions.retain(|q| q.id != r.question_id);
    sub_topic.questions.len() != before
}

pub fn toggle_favorite(sheet: &mut Sheet, r: &QuestionRef) -> bool {
    with_question(sheet, r, "toggle_favorite", |q| {
        q.is_favorite = !q.is_favorite;
        true
    })
}

/// Replaces the notes verbatim. Empty text is stored as-is; notes are free text.
pub fn update_notes(sheet: &mut Sheet, r: &QuestionRef, text: &str) -> bool {
    with_question(sheet, r, "update_notes", |q| {
        q.notes = Some(text.to_string());
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use crate::test_utils::{arrays_sheet, qref, SheetFixture};

    #[test]
    fn add_question_sets_defaults() {
        let mut sheet = SheetFixture::new()
            .with_topic("T")
            .with_sub_topic(0, "S")
            .build();
        let t = sheet.topics[0].id.clone();
        let s = sheet.topics[0].sub_topics[0].id.clone();

        let data = NewQuestion::new("Valid Anagram", Difficulty::Easy)
            .with_platform_url("https://leetcode.com/problems/valid-anagram/");
        let id = add_question(&mut sheet, &t, &s, data).unwrap();

        let q = &sheet.topics[0].sub_topics[0].questions[0];
        assert_eq!(q.id, id);
        assert_eq!(q.title, "Valid Anagram");
        assert!(!q.is_favorite);
        assert!(!q.is_completed);
        assert!(q.tags.is_empty());
        assert_eq!(q.time_spent, 0);
        assert!(!q.is_timer_running);
        assert!(q.timer_started_at.is_none());
        assert_eq!(
            q.platform_url.as_deref(),
            Some("https://leetcode.com/problems/valid-anagram/")
        );
    }

    #[test]
    fn add_question_keeps_provided_tags() {
        let mut sheet = SheetFixture::new()
            .with_topic("T")
            .with_sub_topic(0, "S")
            .build();
        let t = sheet.topics[0].id.clone();
        let s = sheet.topics[0].sub_topics[0].id.clone();
        let data = NewQuestion::new("Q", Difficulty::Hard).with_tags(vec!["dp".into()]);

        add_question(&mut sheet, &t, &s, data).unwrap();
        assert_eq!(sheet.topics[0].sub_topics[0].questions[0].tags, vec!["dp"]);
    }

    #[test]
    fn add_question_to_missing_subtopic_is_noop() {
        let mut sheet = SheetFixture::new().with_topic("T").build();
        let t = sheet.topics[0].id.clone();
        let data = NewQuestion::new("Q", Difficulty::Easy);
        assert!(add_question(&mut sheet, &t, "ghost", data).is_none());
        assert!(!sheet.has_questions());
    }

    #[test]
    fn edit_and_favorite() {
        let (mut sheet, [easy, _]) = arrays_sheet();
        assert!(edit_question(&mut sheet, &easy, "Two Sum II"));
        assert!(toggle_favorite(&mut sheet, &easy));

        let q = sheet.question(&easy).unwrap();
        assert_eq!(q.title, "Two Sum II");
        assert!(q.is_favorite);

        toggle_favorite(&mut sheet, &easy);
        assert!(!sheet.question(&easy).unwrap().is_favorite);
    }

    #[test]
    fn notes_are_stored_verbatim() {
        let (mut sheet, [easy, _]) = arrays_sheet();
        let text = "  use a hash map\n\n  O(n)  ";
        assert!(update_notes(&mut sheet, &easy, text));
        assert_eq!(sheet.question(&easy).unwrap().notes.as_deref(), Some(text));
    }

    #[test]
    fn delete_question_removes_only_target() {
        let (mut sheet, [easy, hard]) = arrays_sheet();
        assert!(delete_question(&mut sheet, &easy));
        assert!(sheet.question(&easy).is_none());
        assert!(sheet.question(&hard).is_some());
        assert!(!delete_question(&mut sheet, &easy));
    }

    #[test]
    fn stale_reference_is_ignored() {
        let (mut sheet, _) = arrays_sheet();
        let mut stale = qref(&sheet, 0, 0, 0);
        stale.question_id = "gone".into();
        let snapshot = sheet.clone();

        assert!(!edit_question(&mut sheet, &stale, "x"));
        assert!(!toggle_favorite(&mut sheet, &stale));
        assert!(!update_notes(&mut sheet, &stale, "x"));
        assert_eq!(sheet, snapshot);
    }
}
