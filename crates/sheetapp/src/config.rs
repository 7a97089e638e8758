//! # Configuration
//!
//! Stored as `config.json` in the data directory. Missing keys take their
//! defaults, so an absent or partial file is always valid.
//!
//! | Key                  | Default               | Description                          |
//! |----------------------|-----------------------|--------------------------------------|
//! | `source_url`         | public SDE sheet API  | Where `sheet fetch` loads data from  |
//! | `tag_limit`          | `3`                   | Source topics kept as question tags  |
//! | `default_sheet_name` | `Question Sheet`      | Name used after a reset              |

use crate::error::{Result, SheetError};
use crate::loader::{DEFAULT_SOURCE_URL, DEFAULT_TAG_LIMIT};
use crate::model::DEFAULT_SHEET_NAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`SheetConfig::set`] and [`SheetConfig::get`].
pub const CONFIG_KEYS: &[&str] = &["source_url", "tag_limit", "default_sheet_name"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetConfig {
    #[serde(default = "default_source_url")]
    pub source_url: String,

    #[serde(default = "default_tag_limit")]
    pub tag_limit: usize,

    #[serde(default = "default_sheet_name")]
    pub default_sheet_name: String,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_tag_limit() -> usize {
    DEFAULT_TAG_LIMIT
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            tag_limit: default_tag_limit(),
            default_sheet_name: default_sheet_name(),
        }
    }
}

impl SheetConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: SheetConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "source_url" => Ok(self.source_url.clone()),
            "tag_limit" => Ok(self.tag_limit.to_string()),
            "default_sheet_name" => Ok(self.default_sheet_name.clone()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "source_url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(SheetError::Config(format!(
                        "source_url must be an http(s) URL, got '{}'",
                        value
                    )));
                }
                self.source_url = value.to_string();
            }
            "tag_limit" => {
                self.tag_limit = value.parse().map_err(|_| {
                    SheetError::Config(format!("tag_limit must be a number, got '{}'", value))
                })?;
            }
            "default_sheet_name" => {
                if value.is_empty() {
                    return Err(SheetError::Config(
                        "default_sheet_name cannot be empty".to_string(),
                    ));
                }
                self.default_sheet_name = value.to_string();
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> SheetError {
    SheetError::Config(format!(
        "Unknown config key '{}' (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
