//! # Domain Model: The Sheet Tree
//!
//! A sheet is a fixed three-tier hierarchy:
//!
//! ```text
//! Sheet
//! └── Topic            (title, collapsed flag)
//!     └── SubTopic     (title, collapsed flag)
//!         └── Question (difficulty, favorite, completion, tags, timer, notes)
//! ```
//!
//! Every level owns its children exclusively, so deleting a topic drops its
//! subtopics and their questions with it. Order within each `Vec` is the
//! user's order; only the reorder commands change it.
//!
//! ## Identifiers
//!
//! Entities carry opaque string ids assigned once by [`new_id`] (or reused from
//! the source document for questions). Nothing parses them, so ids coming from
//! imports or the remote source are kept verbatim.
//!
//! ## Wire Format
//!
//! The serde layout matches the browser tracker's storage and export files
//! (camelCase keys, `timerStartedAt` as epoch milliseconds), so exports from
//! either one import into the other. Loosely typed fields default when
//! absent; that defaulting happens here, once, and nowhere else.
//!
//! ## Timer Invariant
//!
//! `timer_started_at` is `Some` exactly when `is_timer_running` is true. The
//! timer commands in [`crate::commands::timer`] are the only writers of either
//! field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Sheet name used before any data is loaded and after a reset.
pub const DEFAULT_SHEET_NAME: &str = "Question Sheet";

/// Produces a fresh, globally unique identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    /// Legacy synonym of `Easy` found in older sheets.
    Basic,
}

impl Difficulty {
    /// Folds `Basic` into `Easy`; every other value maps to itself.
    pub fn bucket(self) -> Difficulty {
        match self {
            Difficulty::Basic => Difficulty::Easy,
            other => other,
        }
    }

    /// Case-insensitive normalization used for source documents.
    /// Unknown or missing values fall back to `Medium`.
    pub fn normalize(raw: Option<&str>) -> Difficulty {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("easy") | Some("basic") => Difficulty::Easy,
            Some("medium") => Difficulty::Medium,
            Some("hard") => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Basic => "Basic",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            "basic" => Ok(Difficulty::Basic),
            other => Err(format!(
                "unknown difficulty '{}' (expected easy, medium or hard)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Accumulated seconds from finished timer runs.
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub is_timer_running: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub timer_started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Question {
    /// Builds a fresh question with all progress fields at their defaults.
    pub fn from_new(id: String, data: NewQuestion) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for tag in data.tags.unwrap_or_default() {
            let tag = tag.to_lowercase();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        Self {
            id,
            title: data.title,
            difficulty: data.difficulty,
            is_favorite: false,
            is_completed: false,
            tags,
            time_spent: 0,
            is_timer_running: false,
            timer_started_at: None,
            platform_url: data.platform_url,
            solution_url: data.solution_url,
            notes: data.notes,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Caller-supplied fields for a new question; everything else is defaulted.
#[derive(Debug, Clone, Default)]
pub struct NewQuestion {
    pub title: String,
    pub difficulty: Difficulty,
    pub tags: Option<Vec<String>>,
    pub platform_url: Option<String>,
    pub solution_url: Option<String>,
    pub notes: Option<String>,
}

impl NewQuestion {
    pub fn new(title: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            title: title.into(),
            difficulty,
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_platform_url(mut self, url: impl Into<String>) -> Self {
        self.platform_url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTopic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub is_collapsed: bool,
}

impl SubTopic {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            questions: Vec::new(),
            is_collapsed: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sub_topics: Vec<SubTopic>,
    #[serde(default)]
    pub is_collapsed: bool,
}

impl Topic {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            sub_topics: Vec::new(),
            is_collapsed: true,
        }
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sub_topics.iter().flat_map(|st| st.questions.iter())
    }
}

/// The root aggregate: a name plus the ordered topic forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub sheet_name: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Default for Sheet {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            topics: Vec::new(),
        }
    }
}

impl Sheet {
    pub fn new(sheet_name: impl Into<String>, topics: Vec<Topic>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            topics,
        }
    }

    /// True when at least one question exists anywhere in the tree.
    pub fn has_questions(&self) -> bool {
        self.topics
            .iter()
            .any(|t| t.sub_topics.iter().any(|st| !st.questions.is_empty()))
    }

    pub fn question_count(&self) -> usize {
        self.topics.iter().map(|t| t.questions().count()).sum()
    }

    /// Walks every question along with its owning topic and subtopic.
    pub fn iter_questions(&self) -> impl Iterator<Item = (&Topic, &SubTopic, &Question)> {
        self.topics.iter().flat_map(|t| {
            t.sub_topics
                .iter()
                .flat_map(move |st| st.questions.iter().map(move |q| (t, st, q)))
        })
    }

    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    pub fn topic_mut(&mut self, topic_id: &str) -> Option<&mut Topic> {
        self.topics.iter_mut().find(|t| t.id == topic_id)
    }

    pub fn sub_topic(&self, topic_id: &str, sub_topic_id: &str) -> Option<&SubTopic> {
        self.topic(topic_id)?
            .sub_topics
            .iter()
            .find(|st| st.id == sub_topic_id)
    }

    pub fn sub_topic_mut(&mut self, topic_id: &str, sub_topic_id: &str) -> Option<&mut SubTopic> {
        self.topic_mut(topic_id)?
            .sub_topics
            .iter_mut()
            .find(|st| st.id == sub_topic_id)
    }

    pub fn question(&self, r: &QuestionRef) -> Option<&Question> {
        self.sub_topic(&r.topic_id, &r.sub_topic_id)?
            .questions
            .iter()
            .find(|q| q.id == r.question_id)
    }

    pub fn question_mut(&mut self, r: &QuestionRef) -> Option<&mut Question> {
        self.sub_topic_mut(&r.topic_id, &r.sub_topic_id)?
            .questions
            .iter_mut()
            .find(|q| q.id == r.question_id)
    }
}

/// Fully qualified address of a question: every question operation is scoped
/// by its topic and subtopic, mirroring how ownership nests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionRef {
    pub topic_id: String,
    pub sub_topic_id: String,
    pub question_id: String,
}

impl QuestionRef {
    pub fn new(
        topic_id: impl Into<String>,
        sub_topic_id: impl Into<String>,
        question_id: impl Into<String>,
    ) -> Self {
        Self {
            topic_id: topic_id.into(),
            sub_topic_id: sub_topic_id.into(),
            question_id: question_id.into(),
        }
    }
}
