//! # Entity Addressing: IDs vs Display Paths
//!
//! Every entity has an opaque id, which is the right key internally but
//! painful to type. The CLI therefore also accepts a dotted **display path**
//! built from 1-based positions in the full, unfiltered sheet:
//!
//! | Input     | Target                                     |
//! |-----------|--------------------------------------------|
//! | `2`       | second topic                               |
//! | `2.1`     | first subtopic of the second topic         |
//! | `2.1.3`   | third question of that subtopic            |
//!
//! Paths always follow the stored order, never a filtered view, so `2.1.3`
//! names the same question whatever filter the listing used. Reordering does
//! shift paths; ids never change.
//!
//! An input matching an existing id exactly, at any of the three levels,
//! resolves to that entity first; otherwise it is read as a path. Source ids
//! may be all digits, so an id always shadows a path with the same text.

use crate::error::{Result, SheetError};
use crate::model::{QuestionRef, Sheet};
use std::fmt;
use std::str::FromStr;

/// Dotted 1-based position, one to three segments deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPath {
    Topic(usize),
    SubTopic(usize, usize),
    Question(usize, usize, usize),
}

impl fmt::Display for DisplayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayPath::Topic(t) => write!(f, "{}", t),
            DisplayPath::SubTopic(t, s) => write!(f, "{}.{}", t, s),
            DisplayPath::Question(t, s, q) => write!(f, "{}.{}.{}", t, s, q),
        }
    }
}

impl FromStr for DisplayPath {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<usize> = s
            .trim()
            .split('.')
            .map(|p| match p.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(SheetError::NotFound(format!("'{}' is not a valid path", s))),
            })
            .collect::<Result<_>>()?;
        match parts.as_slice() {
            [t] => Ok(DisplayPath::Topic(*t)),
            [t, st] => Ok(DisplayPath::SubTopic(*t, *st)),
            [t, st, q] => Ok(DisplayPath::Question(*t, *st, *q)),
            _ => Err(SheetError::NotFound(format!(
                "'{}' has too many segments (at most topic.subtopic.question)",
                s
            ))),
        }
    }
}

/// A resolved entity, addressed by ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Topic(String),
    SubTopic {
        topic_id: String,
        sub_topic_id: String,
    },
    Question(QuestionRef),
}

impl DisplayPath {
    pub fn resolve(&self, sheet: &Sheet) -> Result<Target> {
        let missing = || SheetError::NotFound(format!("Nothing at {}", self));
        let (t, st, q) = match *self {
            DisplayPath::Topic(t) => (t, None, None),
            DisplayPath::SubTopic(t, st) => (t, Some(st), None),
            DisplayPath::Question(t, st, q) => (t, Some(st), Some(q)),
        };
        let topic = sheet.topics.get(t - 1).ok_or_else(missing)?;
        let Some(st) = st else {
            return Ok(Target::Topic(topic.id.clone()));
        };
        let sub_topic = topic.sub_topics.get(st - 1).ok_or_else(missing)?;
        let Some(q) = q else {
            return Ok(Target::SubTopic {
                topic_id: topic.id.clone(),
                sub_topic_id: sub_topic.id.clone(),
            });
        };
        let question = sub_topic.questions.get(q - 1).ok_or_else(missing)?;
        Ok(Target::Question(QuestionRef::new(
            topic.id.clone(),
            sub_topic.id.clone(),
            question.id.clone(),
        )))
    }
}

/// Resolves user input: an exact id first, a display path otherwise.
pub fn resolve(sheet: &Sheet, input: &str) -> Result<Target> {
    if let Some(target) = find_by_id(sheet, input.trim()) {
        return Ok(target);
    }
    match input.parse::<DisplayPath>() {
        Ok(path) => path.resolve(sheet),
        Err(_) => Err(SheetError::NotFound(format!(
            "No topic, subtopic or question '{}'",
            input
        ))),
    }
}

fn find_by_id(sheet: &Sheet, id: &str) -> Option<Target> {
    for topic in &sheet.topics {
        if topic.id == id {
            return Some(Target::Topic(topic.id.clone()));
        }
        for sub_topic in &topic.sub_topics {
            if sub_topic.id == id {
                return Some(Target::SubTopic {
                    topic_id: topic.id.clone(),
                    sub_topic_id: sub_topic.id.clone(),
                });
            }
            if sub_topic.questions.iter().any(|q| q.id == id) {
                return Some(Target::Question(QuestionRef::new(
                    topic.id.clone(),
                    sub_topic.id.clone(),
                    id,
                )));
            }
        }
    }
    None
}

/// Resolves input that must name a topic.
pub fn resolve_topic(sheet: &Sheet, input: &str) -> Result<String> {
    match resolve(sheet, input)? {
        Target::Topic(id) => Ok(id),
        _ => Err(SheetError::NotFound(format!("'{}' is not a topic", input))),
    }
}

/// Resolves input that must name a subtopic. Returns `(topic_id, sub_topic_id)`.
pub fn resolve_sub_topic(sheet: &Sheet, input: &str) -> Result<(String, String)> {
    match resolve(sheet, input)? {
        Target::SubTopic {
            topic_id,
            sub_topic_id,
        } => Ok((topic_id, sub_topic_id)),
        _ => Err(SheetError::NotFound(format!(
            "'{}' is not a subtopic",
            input
        ))),
    }
}

/// Resolves input that must name a question.
pub fn resolve_question(sheet: &Sheet, input: &str) -> Result<QuestionRef> {
    match resolve(sheet, input)? {
        Target::Question(r) => Ok(r),
        _ => Err(SheetError::NotFound(format!(
            "'{}' is not a question",
            input
        ))),
    }
}
