//! Question tagging commands.
//!
//! - `add_tag`: insert a tag (lowercased) unless already present
//! - `remove_tag`: drop a tag if present
//!
//! Tags keep insertion order for display; uniqueness is enforced on insert.

use crate::commands::questions::with_question;
use crate::model::{QuestionRef, Sheet};

pub fn add_tag(sheet: &mut Sheet, r: &QuestionRef, tag: &str) -> bool {
    let tag = tag.to_lowercase();
    with_question(sheet, r, "add_tag", |q| {
        if q.has_tag(&tag) {
            return false;
        }
        q.tags.push(tag);
        true
    })
}

pub fn remove_tag(sheet: &mut Sheet, r: &QuestionRef, tag: &str) -> bool {
    let tag = tag.to_lowercase();
    with_question(sheet, r, "remove_tag", |q| {
        let before = q.tags.len();
        q.tags.retain(|t| *t != tag);
        q.tags.len() != before
    })
}
