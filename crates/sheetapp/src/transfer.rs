//! Export and import of progress files.
//!
//! An export is `{ sheetName, topics, exportedAt }` as pretty JSON. Import
//! accepts any JSON object with a non-empty string `sheetName` and an array `topics`;
//! other fields (including `exportedAt`) are ignored.

use crate::error::{Result, SheetError};
use crate::model::{Sheet, Topic};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const INVALID_FORMAT: &str = "Invalid file format. Expected exported progress JSON.";
pub const UNPARSEABLE: &str = "Failed to parse JSON file. Please check the file and try again.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub sheet_name: &'a str,
    pub topics: &'a [Topic],
    pub exported_at: DateTime<Utc>,
}

impl<'a> ExportDocument<'a> {
    pub fn new(sheet: &'a Sheet, exported_at: DateTime<Utc>) -> Self {
        Self {
            sheet_name: &sheet.sheet_name,
            topics: &sheet.topics,
            exported_at,
        }
    }
}

/// `"My Sheet"` becomes `"my-sheet-progress.json"`.
pub fn export_filename(sheet_name: &str) -> String {
    let mut slug = String::with_capacity(sheet_name.len());
    let mut in_space = false;
    for c in sheet_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(c.to_lowercase());
            in_space = false;
        }
    }
    format!("{}-progress.json", slug)
}

pub fn export_json(sheet: &Sheet, now: DateTime<Utc>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ExportDocument::new(sheet, now))?)
}

/// Writes the export into `dir` under [`export_filename`] and returns the path.
pub fn write_export(dir: &Path, sheet: &Sheet, now: DateTime<Utc>) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(export_filename(&sheet.sheet_name));
    fs::write(&path, export_json(sheet, now)?)?;
    Ok(path)
}

/// Validates an import file and returns the sheet it describes.
pub fn parse_import(text: &str) -> Result<Sheet> {
    let value: Value =
        serde_json::from_str(text).map_err(|_| SheetError::InvalidImport(UNPARSEABLE.into()))?;
    let invalid = || SheetError::InvalidImport(INVALID_FORMAT.into());

    let sheet_name = value
        .get("sheetName")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(invalid)?
        .to_string();
    let topics = value
        .get("topics")
        .filter(|t| t.is_array())
        .cloned()
        .ok_or_else(invalid)?;
    let topics: Vec<Topic> = serde_json::from_value(topics).map_err(|_| invalid())?;

    Ok(Sheet::new(sheet_name, topics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::arrays_sheet;
    use chrono::TimeZone;

    #[test]
    fn filename_from_sheet_name() {
        assert_eq!(export_filename("Striver SDE Sheet"), "striver-sde-sheet-progress.json");
        assert_eq!(export_filename("A  \t B"), "a-b-progress.json");
        assert_eq!(export_filename("Blind75"), "blind75-progress.json");
        assert_eq!(export_filename(" Padded "), "-padded--progress.json");
    }

    #[test]
    fn export_layout() {
        let (sheet, _) = arrays_sheet();
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let json: Value = serde_json::from_str(&export_json(&sheet, now).unwrap()).unwrap();

        assert_eq!(json["sheetName"], "Question Sheet");
        assert_eq!(json["exportedAt"], "2024-05-06T07:08:09Z");
        assert_eq!(json["topics"][0]["title"], "Arrays");
        assert_eq!(
            json["topics"][0]["subTopics"][0]["questions"][1]["timeSpent"],
            125
        );
    }

    #[test]
    fn export_then_import_restores_sheet() {
        let (sheet, _) = arrays_sheet();
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(dir.path(), &sheet, Utc::now()).unwrap();
        assert!(path.ends_with("question-sheet-progress.json"));

        let imported = parse_import(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(imported, sheet);
    }

    #[test]
    fn rejects_missing_topics() {
        let err = parse_import(r#"{"sheetName":"X"}"#).unwrap_err();
        match err {
            SheetError::InvalidImport(msg) => assert_eq!(msg, INVALID_FORMAT),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(parse_import(r#"{"topics":[]}"#).is_err());
        assert!(parse_import(r#"{"sheetName":1,"topics":[]}"#).is_err());
        assert!(parse_import(r#"{"sheetName":"","topics":[]}"#).is_err());
        assert!(parse_import(r#"{"sheetName":"X","topics":{}}"#).is_err());
        assert!(parse_import(r#"{"sheetName":"X","topics":[{"nope":true}]}"#).is_err());
        assert!(parse_import("[]").is_err());
    }

    #[test]
    fn rejects_non_json() {
        match parse_import("not json").unwrap_err() {
            SheetError::InvalidImport(msg) => assert_eq!(msg, UNPARSEABLE),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn accepts_minimal_payload() {
        let sheet = parse_import(r#"{"sheetName":"X","topics":[]}"#).unwrap();
        assert_eq!(sheet.sheet_name, "X");
        assert!(sheet.topics.is_empty());
    }
}
