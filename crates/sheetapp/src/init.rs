//! # Data Directory Resolution
//!
//! Everything the app stores lives in one directory: the sheet blob, the
//! study goals and `config.json`.
//!
//! ## Resolution Order
//!
//! 1. An explicit override (the CLI's `--data-dir`).
//! 2. The `SHEET_DATA_DIR` environment variable (handy for tests and for
//!    keeping several sheets side by side).
//! 3. The OS-appropriate data directory, via the `directories` crate.
//!
//! [`initialize`] resolves the directory, loads the config and opens the API
//! over a [`FileBlobStore`] rooted there.

use crate::api::SheetApi;
use crate::config::SheetConfig;
use crate::error::{Result, SheetError};
use crate::store::fs::FileBlobStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const DATA_DIR_ENV: &str = "SHEET_DATA_DIR";

pub struct SheetContext {
    pub api: SheetApi<FileBlobStore>,
    pub config: SheetConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let dirs = ProjectDirs::from("com", "sheet", "sheet")
        .ok_or_else(|| SheetError::Config("Could not determine data dir".to_string()))?;
    Ok(dirs.data_dir().to_path_buf())
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<SheetContext> {
    let data_dir = resolve_data_dir(data_override)?;
    debug!(data_dir = %data_dir.display(), "using data directory");

    let config = SheetConfig::load(&data_dir)?;
    let store = FileBlobStore::new(data_dir.clone());
    let api = SheetApi::open(store)?.with_default_sheet_name(config.default_sheet_name.clone());

    Ok(SheetContext {
        api,
        config,
        data_dir,
    })
}
