//! Persistence gateway: what is stored under each key, and how it is read back.
//!
//! Only the durable subset of application state is written: the sheet name,
//! the topic tree and the theme flag. Search and filter state never reach
//! storage. A missing or unreadable blob loads as the empty default so a bad
//! file can always be recovered from with import or reset.

use crate::error::Result;
use crate::goals::GoalItem;
use crate::model::{Sheet, Topic, DEFAULT_SHEET_NAME};
use crate::store::BlobStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const SHEET_STORE_KEY: &str = "sheet-store";
pub const STUDY_GOALS_KEY: &str = "study-goals";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_dark_mode() -> bool {
    true
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            sheet_name: default_sheet_name(),
            dark_mode: default_dark_mode(),
        }
    }
}

impl PersistedState {
    pub fn from_sheet(sheet: &Sheet, dark_mode: bool) -> Self {
        Self {
            topics: sheet.topics.clone(),
            sheet_name: sheet.sheet_name.clone(),
            dark_mode,
        }
    }

    pub fn into_parts(self) -> (Sheet, bool) {
        (Sheet::new(self.sheet_name, self.topics), self.dark_mode)
    }
}

pub fn load_state<S: BlobStore>(store: &S) -> Result<PersistedState> {
    Ok(load_or_default(store, SHEET_STORE_KEY)?.unwrap_or_default())
}

pub fn save_state<S: BlobStore>(store: &S, state: &PersistedState) -> Result<()> {
    store.set(SHEET_STORE_KEY, &serde_json::to_string(state)?)
}

pub fn load_goals<S: BlobStore>(store: &S) -> Result<Vec<GoalItem>> {
    Ok(load_or_default(store, STUDY_GOALS_KEY)?.unwrap_or_default())
}

pub fn save_goals<S: BlobStore>(store: &S, goals: &[GoalItem]) -> Result<()> {
    store.set(STUDY_GOALS_KEY, &serde_json::to_string(goals)?)
}

/// Removes both keys.
pub fn clear_all<S: BlobStore>(store: &S) -> Result<()> {
    store.remove(SHEET_STORE_KEY)?;
    store.remove(STUDY_GOALS_KEY)?;
    Ok(())
}

/// I/O errors propagate; a blob that fails to parse is logged and treated as absent.
fn load_or_default<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: BlobStore,
    T: for<'de> Deserialize<'de>,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(key, error = %err, "ignoring unreadable stored data");
            Ok(None)
        }
    }
}
