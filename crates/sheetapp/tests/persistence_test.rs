use chrono::{Duration, TimeZone, Utc};
use sheetapp::api::SheetApi;
use sheetapp::loader::{transform, SourceDocument, DEFAULT_TAG_LIMIT};
use sheetapp::model::{Difficulty, NewQuestion};
use sheetapp::persist::SHEET_STORE_KEY;
use sheetapp::store::fs::FileBlobStore;
use sheetapp::store::BlobStore;
use std::fs;
use tempfile::TempDir;

const SOURCE: &str = r#"{
    "data": {
        "sheet": {"name": "Mini Sheet", "config": {"topicOrder": ["Arrays"]}},
        "questions": [
            {"_id": "q-1", "topic": "Arrays", "title": "Two Sum", "subTopic": "Basics",
             "questionId": {"difficulty": "Easy", "topics": ["Array"]}},
            {"_id": "q-2", "topic": "Arrays", "title": "3Sum", "subTopic": "Basics",
             "questionId": {"difficulty": "Medium"}}
        ]
    }
}"#;

fn open(dir: &TempDir) -> SheetApi<FileBlobStore> {
    SheetApi::open(FileBlobStore::new(dir.path().to_path_buf())).unwrap()
}

fn source() -> SourceDocument {
    serde_json::from_str(SOURCE).unwrap()
}

#[test]
fn test_progress_survives_restart() {
    let dir = TempDir::new().unwrap();
    let t0 = Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap();

    {
        let mut api = open(&dir);
        api.seed(transform(&source(), DEFAULT_TAG_LIMIT)).unwrap();
        api.start_timer("q-2", t0).unwrap();
        api.stop_timer("q-2", t0 + Duration::seconds(90)).unwrap();
        api.update_notes("1.1.1", "hash map, one pass").unwrap();
    }

    let api = open(&dir);
    let sheet = api.sheet();
    assert_eq!(sheet.sheet_name, "Mini Sheet");
    let questions = &sheet.topics[0].sub_topics[0].questions;
    assert_eq!(questions[0].notes.as_deref(), Some("hash map, one pass"));
    assert_eq!(questions[1].time_spent, 90);
    assert!(questions[1].is_completed);
    assert_eq!(api.stats().overall_progress, 50);
}

#[test]
fn test_first_run_guard_across_restarts() {
    let dir = TempDir::new().unwrap();

    {
        let mut api = open(&dir);
        assert!(api.seed(transform(&source(), DEFAULT_TAG_LIMIT)).unwrap().changed);
        api.toggle_complete("1.1.1").unwrap();
    }

    // A second start re-fetches the source; user progress must win.
    let mut api = open(&dir);
    let res = api.seed(transform(&source(), DEFAULT_TAG_LIMIT)).unwrap();
    assert!(!res.changed);
    assert!(api.sheet().topics[0].sub_topics[0].questions[0].is_completed);
}

#[test]
fn test_user_built_sheet_blocks_seeding() {
    let dir = TempDir::new().unwrap();
    {
        let mut api = open(&dir);
        api.add_topic("Mine").unwrap();
        api.add_sub_topic("1", "Stuff").unwrap();
        api.add_question("1.1", NewQuestion::new("Custom", Difficulty::Hard))
            .unwrap();
    }
    let mut api = open(&dir);
    assert!(!api.seed(transform(&source(), DEFAULT_TAG_LIMIT)).unwrap().changed);
    assert_eq!(api.sheet().topics[0].title, "Mine");
}

#[test]
fn test_corrupt_store_recovers_via_import() {
    let dir = TempDir::new().unwrap();
    let store = FileBlobStore::new(dir.path().to_path_buf());
    store.set(SHEET_STORE_KEY, "{ truncated").unwrap();

    let mut api = SheetApi::open(store).unwrap();
    assert!(api.sheet().topics.is_empty());

    api.import_progress(r#"{"sheetName":"Recovered","topics":[]}"#)
        .unwrap();
    let on_disk = fs::read_to_string(dir.path().join("sheet-store.json")).unwrap();
    assert!(on_disk.contains("\"sheetName\":\"Recovered\""));
}

#[test]
fn test_export_import_between_data_dirs() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let mut api = open(&first);
    api.seed(transform(&source(), DEFAULT_TAG_LIMIT)).unwrap();
    api.toggle_favorite("q-1").unwrap();
    api.export_to(out.path(), Utc::now()).unwrap();

    let exported = fs::read_to_string(out.path().join("mini-sheet-progress.json")).unwrap();
    let mut other = open(&second);
    other.import_progress(&exported).unwrap();

    assert_eq!(other.sheet(), api.sheet());
    assert!(open(&second).sheet().topics[0].sub_topics[0].questions[0].is_favorite);
}

#[test]
fn test_reset_removes_files() {
    let dir = TempDir::new().unwrap();
    let mut api = open(&dir);
    api.add_topic("Temp").unwrap();
    api.add_goal("finish arrays", Utc::now()).unwrap();
    assert!(dir.path().join("sheet-store.json").exists());
    assert!(dir.path().join("study-goals.json").exists());

    api.reset_all().unwrap();
    assert!(!dir.path().join("sheet-store.json").exists());
    assert!(!dir.path().join("study-goals.json").exists());
    assert!(open(&dir).sheet().topics.is_empty());
}
