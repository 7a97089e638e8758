//! Source loader: fetches the curated question list and turns its flat
//! question array into the topic tree.
//!
//! The remote document is loosely typed. Every optional field is defaulted
//! here, once, so the rest of the crate only ever sees a well-formed
//! [`Topic`] tree.

use crate::error::{Result, SheetError};
use crate::model::{new_id, Difficulty, Question, SubTopic, Topic};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Public sheet fetched when no `source_url` is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://node.codolio.com/api/question-tracker/v1/sheet/public/get-sheet-by-slug/striver-sde-sheet";

/// Number of source topics kept as tags on each question.
pub const DEFAULT_TAG_LIMIT: usize = 3;

/// Subtopic used for source questions that have none.
pub const GENERAL_SUB_TOPIC: &str = "General";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceStatus {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub status: Option<SourceStatus>,
    pub data: SourceData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceData {
    pub sheet: SourceSheet,
    #[serde(default)]
    pub questions: Vec<SourceQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSheet {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub config: SourceConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    #[serde(default)]
    pub topic_order: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceQuestion {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub topic: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sub_topic: Option<String>,
    #[serde(default)]
    pub question_id: Option<SourceQuestionInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceQuestionInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub problem_url: Option<String>,
}

/// Loader output, ready for `set_initial_data`.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    pub sheet_name: String,
    pub description: String,
    pub link: String,
    pub topics: Vec<Topic>,
}

/// Groups the flat question list into topics and subtopics.
///
/// Groups keep first-seen order, except that topics named in `topicOrder`
/// come first, in that order.
pub fn transform(doc: &SourceDocument, tag_limit: usize) -> LoadedSheet {
    let sheet = &doc.data.sheet;
    // (topic title, [(subtopic title, questions)])
    let mut groups: Vec<(String, Vec<(String, Vec<Question>)>)> = Vec::new();

    for sq in &doc.data.questions {
        let question = to_question(sq, tag_limit);
        let sub_title = sq
            .sub_topic
            .clone()
            .unwrap_or_else(|| GENERAL_SUB_TOPIC.to_string());

        let topic_idx = match groups.iter().position(|(t, _)| *t == sq.topic) {
            Some(idx) => idx,
            None => {
                groups.push((sq.topic.clone(), Vec::new()));
                groups.len() - 1
            }
        };
        let subs = &mut groups[topic_idx].1;
        match subs.iter_mut().find(|(s, _)| *s == sub_title) {
            Some((_, questions)) => questions.push(question),
            None => subs.push((sub_title, vec![question])),
        }
    }

    let mut ordered = Vec::with_capacity(groups.len());
    for name in &sheet.config.topic_order {
        if let Some(idx) = groups.iter().position(|(t, _)| t == name) {
            ordered.push(groups.remove(idx));
        }
    }
    ordered.extend(groups);

    let topics: Vec<Topic> = ordered
        .into_iter()
        .map(|(title, subs)| Topic {
            id: new_id(),
            title,
            sub_topics: subs
                .into_iter()
                .map(|(title, questions)| SubTopic {
                    id: new_id(),
                    title,
                    questions,
                    is_collapsed: true,
                })
                .collect(),
            is_collapsed: true,
        })
        .collect();

    debug!(
        questions = doc.data.questions.len(),
        topics = topics.len(),
        "transformed source document"
    );

    LoadedSheet {
        sheet_name: sheet.name.clone(),
        description: sheet.description.clone().unwrap_or_default(),
        link: sheet.link.clone().unwrap_or_default(),
        topics,
    }
}

fn to_question(sq: &SourceQuestion, tag_limit: usize) -> Question {
    let info = sq.question_id.clone().unwrap_or_default();
    let id = sq
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(new_id);
    let title = sq
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .or_else(|| info.name.clone().filter(|n| !n.is_empty()))
        .unwrap_or_else(|| "Untitled".to_string());

    let mut tags: Vec<String> = Vec::new();
    for tag in info.topics.unwrap_or_default().into_iter().take(tag_limit) {
        let tag = tag.to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    Question {
        id,
        title,
        difficulty: Difficulty::normalize(info.difficulty.as_deref()),
        is_favorite: false,
        is_completed: false,
        tags,
        time_spent: 0,
        is_timer_running: false,
        timer_started_at: None,
        platform_url: info.problem_url,
        solution_url: None,
        notes: None,
    }
}

/// Blocking GET of a source document.
pub fn fetch_source(url: &str) -> Result<SourceDocument> {
    info!(url, "fetching source sheet");
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let response = client
        .get(url)
        .header(
            USER_AGENT,
            format!("sheet/{}", env!("CARGO_PKG_VERSION")),
        )
        .header(ACCEPT, "application/json")
        .send()?;

    if !response.status().is_success() {
        return Err(SheetError::Network(format!(
            "Failed to fetch sheet data (HTTP {})",
            response.status().as_u16()
        )));
    }

    parse_source(&response.text()?)
}

/// Reads a source document from a local file.
pub fn read_source(path: &Path) -> Result<SourceDocument> {
    parse_source(&std::fs::read_to_string(path)?)
}

/// Parses a source document. A document whose `status` reports failure is
/// rejected even when its `data` parses.
pub fn parse_source(body: &str) -> Result<SourceDocument> {
    let doc: SourceDocument = serde_json::from_str(body)?;
    if let Some(status) = doc.status.as_ref().filter(|s| !s.success) {
        return Err(SheetError::Network(format!(
            "Source reported failure (code {})",
            status.code
        )));
    }
    Ok(doc)
}
