//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every operation, whatever UI sits in front of it, and it
//! owns the application state explicitly: nothing in the crate is global.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Validates inputs** at the boundary (blank titles and tags, import shape)
//! - **Resolves addresses** (display paths like `2.1.3` or raw ids) to ids
//! - **Dispatches** to the appropriate command function
//! - **Persists** the durable state after every call that changed it
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation concerns**: returns data structures, not strings
//! - **Clock access**: timer and goal calls take `now` from the caller
//!
//! ## State
//!
//! [`AppState`] holds the sheet, the theme flag and the transient filter
//! context. Only the sheet and the theme are persisted (see
//! [`crate::persist`]); the filter lives as long as the `SheetApi` value.
//!
//! ## Generic Over BlobStore
//!
//! `SheetApi<S: BlobStore>` is generic over the storage backend:
//! - Production: `SheetApi<FileBlobStore>`
//! - Testing: `SheetApi<MemBlobStore>`

use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::{Result, SheetError};
use crate::filter::{self, FilterContext, VisibleTopic};
use crate::goals::{self, GoalItem};
use crate::index;
use crate::loader::LoadedSheet;
use crate::model::{NewQuestion, Sheet, DEFAULT_SHEET_NAME};
use crate::persist::{self, PersistedState};
use crate::stats::{SheetStats, TopicProgress};
use crate::store::BlobStore;
use crate::transfer;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct AppState {
    pub sheet: Sheet,
    pub dark_mode: bool,
    pub filter: FilterContext,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            sheet: Sheet::default(),
            dark_mode: true,
            filter: FilterContext::default(),
        }
    }
}

/// The main API facade.
///
/// All UI clients (the CLI today) interact through this type.
pub struct SheetApi<S: BlobStore> {
    store: S,
    state: AppState,
    default_sheet_name: String,
}

impl<S: BlobStore> SheetApi<S> {
    /// Restores persisted state from `store`.
    pub fn open(store: S) -> Result<Self> {
        let (sheet, dark_mode) = persist::load_state(&store)?.into_parts();
        debug!(
            sheet_name = %sheet.sheet_name,
            questions = sheet.question_count(),
            "loaded sheet"
        );
        Ok(Self {
            store,
            state: AppState {
                sheet,
                dark_mode,
                filter: FilterContext::default(),
            },
            default_sheet_name: DEFAULT_SHEET_NAME.to_string(),
        })
    }

    /// Name given to the sheet by [`SheetApi::reset_all`].
    pub fn with_default_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.default_sheet_name = name.into();
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn sheet(&self) -> &Sheet {
        &self.state.sheet
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- View state (never persisted) ---

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.filter.search_query = query.into();
    }

    pub fn set_show_favorites_only(&mut self, on: bool) {
        self.state.filter.favorites_only = on;
    }

    pub fn set_tag_filter(&mut self, tag: impl Into<String>) {
        self.state.filter.tag_filter = tag.into().trim().to_lowercase();
    }

    pub fn visible(&self) -> Vec<VisibleTopic<'_>> {
        filter::visible_sheet(&self.state.sheet, &self.state.filter)
    }

    pub fn stats(&self) -> SheetStats {
        SheetStats::compute(&self.state.sheet)
    }

    pub fn visible_topic_progress(&self) -> Vec<TopicProgress> {
        SheetStats::compute_visible(&self.state.sheet, &self.state.filter)
    }

    pub fn all_tags(&self) -> Vec<String> {
        filter::all_tags(&self.state.sheet)
    }

    // --- Lifecycle ---

    /// Seeds from loader output unless progress already exists.
    pub fn seed(&mut self, loaded: LoadedSheet) -> Result<CmdResult> {
        let LoadedSheet {
            sheet_name,
            description,
            link,
            topics,
        } = loaded;
        let changed =
            commands::lifecycle::set_initial_data(&mut self.state.sheet, &sheet_name, topics);
        let result = self.finish(changed)?;
        Ok(if changed {
            let mut result = result.with_message(CmdMessage::success(format!(
                "Loaded {} questions into '{}'",
                self.state.sheet.question_count(),
                self.state.sheet.sheet_name
            )));
            for extra in [description, link] {
                let extra = extra.trim();
                if !extra.is_empty() {
                    result = result.with_message(CmdMessage::info(extra));
                }
            }
            result
        } else {
            result.with_message(CmdMessage::info(
                "Existing progress found; source data was not applied",
            ))
        })
    }

    /// Validates and applies an exported progress file.
    pub fn import_progress(&mut self, text: &str) -> Result<CmdResult> {
        let payload = transfer::parse_import(text)?;
        let changed = commands::lifecycle::import_progress(&mut self.state.sheet, payload);
        let result = self.finish(changed)?;
        Ok(result.with_message(CmdMessage::success(format!(
            "Imported '{}' ({} questions)",
            self.state.sheet.sheet_name,
            self.state.sheet.question_count()
        ))))
    }

    pub fn export_to(&self, dir: &Path, now: DateTime<Utc>) -> Result<CmdResult> {
        let path = transfer::write_export(dir, &self.state.sheet, now)?;
        info!(path = %path.display(), "exported progress");
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Exported progress to {}",
            path.display()
        ))))
    }

    /// Clears both storage keys and every piece of in-memory state.
    pub fn reset_all(&mut self) -> Result<CmdResult> {
        persist::clear_all(&self.store)?;
        commands::lifecycle::reset_sheet(&mut self.state.sheet);
        self.state.sheet.sheet_name = self.default_sheet_name.clone();
        self.state.dark_mode = true;
        self.state.filter = FilterContext::default();
        info!("all data reset");
        Ok(CmdResult::changed(true).with_message(CmdMessage::success("All data has been reset")))
    }

    pub fn toggle_dark_mode(&mut self) -> Result<CmdResult> {
        self.state.dark_mode = !self.state.dark_mode;
        let mode = if self.state.dark_mode { "dark" } else { "light" };
        Ok(self
            .finish(true)?
            .with_message(CmdMessage::success(format!("Theme set to {}", mode))))
    }

    pub fn set_all_collapsed(&mut self, collapsed: bool) -> Result<CmdResult> {
        let changed = commands::collapse::set_all_collapsed(&mut self.state.sheet, collapsed);
        self.finish(changed)
    }

    // --- Topics ---

    pub fn add_topic(&mut self, title: &str) -> Result<CmdResult> {
        let title = require_text("Topic title", title)?;
        let id = commands::topics::add_topic(&mut self.state.sheet, &title);
        Ok(self.finish(true)?.with_created_id(id))
    }

    pub fn edit_topic(&mut self, target: &str, title: &str) -> Result<CmdResult> {
        let title = require_text("Topic title", title)?;
        let id = index::resolve_topic(&self.state.sheet, target)?;
        let changed = commands::topics::edit_topic(&mut self.state.sheet, &id, &title);
        self.finish(changed)
    }

    pub fn delete_topic(&mut self, target: &str) -> Result<CmdResult> {
        let id = index::resolve_topic(&self.state.sheet, target)?;
        let changed = commands::topics::delete_topic(&mut self.state.sheet, &id);
        self.finish(changed)
    }

    pub fn toggle_topic(&mut self, target: &str) -> Result<CmdResult> {
        let id = index::resolve_topic(&self.state.sheet, target)?;
        let changed = commands::topics::toggle_collapse(&mut self.state.sheet, &id);
        self.finish(changed)
    }

    /// Moves a topic to a 1-based position.
    pub fn move_topic(&mut self, target: &str, to: usize) -> Result<CmdResult> {
        let id = index::resolve_topic(&self.state.sheet, target)?;
        let topics = &self.state.sheet.topics;
        let from = position(topics.iter().map(|t| &t.id), &id)?;
        let to = to_index(to, topics.len())?;
        let changed = commands::reorder::reorder_topics(&mut self.state.sheet, from, to);
        self.finish(changed)
    }

    // --- Subtopics ---

    pub fn add_sub_topic(&mut self, topic: &str, title: &str) -> Result<CmdResult> {
        let title = require_text("Subtopic title", title)?;
        let topic_id = index::resolve_topic(&self.state.sheet, topic)?;
        match commands::subtopics::add_sub_topic(&mut self.state.sheet, &topic_id, &title) {
            Some(id) => Ok(self.finish(true)?.with_created_id(id)),
            None => self.finish(false),
        }
    }

    pub fn edit_sub_topic(&mut self, target: &str, title: &str) -> Result<CmdResult> {
        let title = require_text("Subtopic title", title)?;
        let (t, st) = index::resolve_sub_topic(&self.state.sheet, target)?;
        let changed = commands::subtopics::edit_sub_topic(&mut self.state.sheet, &t, &st, &title);
        self.finish(changed)
    }

    pub fn delete_sub_topic(&mut self, target: &str) -> Result<CmdResult> {
        let (t, st) = index::resolve_sub_topic(&self.state.sheet, target)?;
        let changed = commands::subtopics::delete_sub_topic(&mut self.state.sheet, &t, &st);
        self.finish(changed)
    }

    pub fn toggle_sub_topic(&mut self, target: &str) -> Result<CmdResult> {
        let (t, st) = index::resolve_sub_topic(&self.state.sheet, target)?;
        let changed =
            commands::subtopics::toggle_collapse_sub_topic(&mut self.state.sheet, &t, &st);
        self.finish(changed)
    }

    pub fn move_sub_topic(&mut self, target: &str, to: usize) -> Result<CmdResult> {
        let (t, st) = index::resolve_sub_topic(&self.state.sheet, target)?;
        let (from, to) = {
            let topic = self
                .state
                .sheet
                .topic(&t)
                .ok_or_else(|| SheetError::NotFound(target.to_string()))?;
            let from = position(topic.sub_topics.iter().map(|s| &s.id), &st)?;
            (from, to_index(to, topic.sub_topics.len())?)
        };
        let changed = commands::reorder::reorder_sub_topics(&mut self.state.sheet, &t, from, to);
        self.finish(changed)
    }

    // --- Questions ---

    pub fn add_question(&mut self, sub_topic: &str, mut data: NewQuestion) -> Result<CmdResult> {
        data.title = require_text("Question title", &data.title)?;
        if let Some(tags) = data.tags.take() {
            data.tags = Some(
                tags.iter()
                    .map(|t| require_text("Tag", t))
                    .collect::<Result<Vec<_>>>()?,
            );
        }
        let (t, st) = index::resolve_sub_topic(&self.state.sheet, sub_topic)?;
        match commands::questions::add_question(&mut self.state.sheet, &t, &st, data) {
            Some(id) => Ok(self.finish(true)?.with_created_id(id)),
            None => self.finish(false),
        }
    }

    pub fn edit_question(&mut self, target: &str, title: &str) -> Result<CmdResult> {
        let title = require_text("Question title", title)?;
        let r = index::resolve_question(&self.state.sheet, target)?;
        let changed = commands::questions::edit_question(&mut self.state.sheet, &r, &title);
        self.finish(changed)
    }

    pub fn delete_question(&mut self, target: &str) -> Result<CmdResult> {
        let r = index::resolve_question(&self.state.sheet, target)?;
        let changed = commands::questions::delete_question(&mut self.state.sheet, &r);
        self.finish(changed)
    }

    pub fn toggle_favorite(&mut self, target: &str) -> Result<CmdResult> {
        let r = index::resolve_question(&self.state.sheet, target)?;
        let changed = commands::questions::toggle_favorite(&mut self.state.sheet, &r);
        self.finish(changed)
    }

    /// Notes are free text and stored verbatim, blank included.
    pub fn update_notes(&mut self, target: &str, text: &str) -> Result<CmdResult> {
        let r = index::resolve_question(&self.state.sheet, target)?;
        let changed = commands::questions::update_notes(&mut self.state.sheet, &r, text);
        self.finish(changed)
    }

    pub fn move_question(&mut self, target: &str, to: usize) -> Result<CmdResult> {
        let r = index::resolve_question(&self.state.sheet, target)?;
        let (from, to) = {
            let sub_topic = self
                .state
                .sheet
                .sub_topic(&r.topic_id, &r.sub_topic_id)
                .ok_or_else(|| SheetError::NotFound(target.to_string()))?;
            let from = position(sub_topic.questions.iter().map(|q| &q.id), &r.question_id)?;
            (from, to_index(to, sub_topic.questions.len())?)
        };
        let changed = commands::reorder::reorder_questions(
            &mut self.state.sheet,
            &r.topic_id,
            &r.sub_topic_id,
            from,
            to,
        );
        self.finish(changed)
    }

    pub fn add_tag(&mut self, target: &str, tag: &str) -> Result<CmdResult> {
        let tag = require_text("Tag", tag)?;
        let r = index::resolve_question(&self.state.sheet, target)?;
        let changed = commands::tagging::add_tag(&mut self.state.sheet, &r, &tag);
        let result = self.finish(changed)?;
        Ok(if changed {
            result
        } else {
            result.with_message(CmdMessage::info(format!(
                "Question already tagged '{}'",
                tag.to_lowercase()
            )))
        })
    }

    pub fn remove_tag(&mut self, target: &str, tag: &str) -> Result<CmdResult> {
        let tag = require_text("Tag", tag)?;
        let r = index::resolve_question(&self.state.sheet, target)?;
        let changed = commands::tagging::remove_tag(&mut self.state.sheet, &r, &tag);
        self.finish(changed)
    }

    // --- Timer ---

    pub fn start_timer(&mut self, target: &str, now: DateTime<Utc>) -> Result<CmdResult> {
        let r = index::resolve_question(&self.state.sheet, target)?;
        let changed = commands::timer::start_timer(&mut self.state.sheet, &r, now);
        self.finish(changed)
    }

    pub fn stop_timer(&mut self, target: &str, now: DateTime<Utc>) -> Result<CmdResult> {
        let r = index::resolve_question(&self.state.sheet, target)?;
        let changed = commands::timer::stop_timer(&mut self.state.sheet, &r, now);
        self.finish(changed)
    }

    pub fn reset_timer(&mut self, target: &str, now: DateTime<Utc>) -> Result<CmdResult> {
        let r = index::resolve_question(&self.state.sheet, target)?;
        let changed = commands::timer::reset_timer(&mut self.state.sheet, &r, now);
        self.finish(changed)
    }

    pub fn toggle_complete(&mut self, target: &str) -> Result<CmdResult> {
        let r = index::resolve_question(&self.state.sheet, target)?;
        let changed = commands::timer::toggle_complete(&mut self.state.sheet, &r);
        self.finish(changed)
    }

    // --- Study goals ---

    pub fn goals(&self) -> Result<Vec<GoalItem>> {
        persist::load_goals(&self.store)
    }

    pub fn add_goal(&mut self, text: &str, now: DateTime<Utc>) -> Result<CmdResult> {
        let mut list = self.goals()?;
        let id = goals::add_goal(&mut list, text, now)
            .ok_or_else(|| SheetError::Validation("Goal text cannot be empty".to_string()))?;
        persist::save_goals(&self.store, &list)?;
        Ok(CmdResult::changed(true).with_created_id(id))
    }

    pub fn toggle_goal(&mut self, target: &str) -> Result<CmdResult> {
        let mut list = self.goals()?;
        let id = resolve_goal(&list, target)?;
        let changed = goals::toggle_goal(&mut list, &id);
        persist::save_goals(&self.store, &list)?;
        Ok(CmdResult::changed(changed))
    }

    pub fn delete_goal(&mut self, target: &str) -> Result<CmdResult> {
        let mut list = self.goals()?;
        let id = resolve_goal(&list, target)?;
        let changed = goals::delete_goal(&mut list, &id);
        persist::save_goals(&self.store, &list)?;
        Ok(CmdResult::changed(changed))
    }

    pub fn clear_completed_goals(&mut self) -> Result<CmdResult> {
        let mut list = self.goals()?;
        let removed = goals::clear_completed(&mut list);
        if removed > 0 {
            persist::save_goals(&self.store, &list)?;
        }
        Ok(CmdResult::changed(removed > 0).with_message(CmdMessage::info(format!(
            "Removed {} completed goal{}",
            removed,
            if removed == 1 { "" } else { "s" }
        ))))
    }

    /// Persists after a change; logs the skip otherwise.
    fn finish(&mut self, changed: bool) -> Result<CmdResult> {
        if changed {
            let snapshot = PersistedState::from_sheet(&self.state.sheet, self.state.dark_mode);
            persist::save_state(&self.store, &snapshot)?;
        } else {
            debug!("no change; nothing persisted");
        }
        Ok(CmdResult::changed(changed))
    }
}

fn require_text(label: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SheetError::Validation(format!("{} cannot be empty", label)));
    }
    Ok(trimmed.to_string())
}

fn position<'a>(mut ids: impl Iterator<Item = &'a String>, id: &str) -> Result<usize> {
    ids.position(|i| i == id)
        .ok_or_else(|| SheetError::NotFound(id.to_string()))
}

/// Converts a 1-based user position into an index.
fn to_index(position: usize, len: usize) -> Result<usize> {
    if position == 0 || position > len {
        return Err(SheetError::Validation(format!(
            "Position must be between 1 and {}",
            len
        )));
    }
    Ok(position - 1)
}

/// Goals are addressed by their 1-based position in the list, or by id.
fn resolve_goal(list: &[GoalItem], target: &str) -> Result<String> {
    let target = target.trim();
    if let Ok(n) = target.parse::<usize>() {
        if n >= 1 && n <= list.len() {
            return Ok(list[n - 1].id.clone());
        }
    }
    list.iter()
        .find(|g| g.id == target)
        .map(|g| g.id.clone())
        .ok_or_else(|| SheetError::NotFound(format!("No goal '{}'", target)))
}
