//! JSON entry store tests
//!
//! Tests cover:
//! - Missing file loads as empty
//! - Corrupt file reports CorruptStore on load, is replaced on append
//! - Appends keep insertion order and create parent directories
//! - Files without the parsed feedback sections still load

use chrono::NaiveDate;
use readlog_common::{EntryStore, Error, JsonFileStore, ReadingEntry};
use tempfile::TempDir;

fn entry(title: &str, rating: Option<u8>) -> ReadingEntry {
    ReadingEntry {
        date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
        book_title: title.to_string(),
        writeup: format!("My summary of {}", title),
        feedback: "## Rating\n8/10".to_string(),
        rating,
        reference_summary: Some("Reference".to_string()),
        explanation: None,
    }
}

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path().join("saved_entries.json"));

    let entries = store.load().await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_append_creates_parent_dirs_and_keeps_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data").join("saved_entries.json");
    let store = JsonFileStore::new(&path);
    assert_eq!(store.path(), path.as_path());

    assert_eq!(store.append(entry("Matilda", Some(8))).await.unwrap(), 0);
    assert_eq!(store.append(entry("Holes", None)).await.unwrap(), 1);
    assert!(path.exists());

    let entries = store.load().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].book_title, "Matilda");
    assert_eq!(entries[1].book_title, "Holes");
    assert_eq!(entries[1].rating, None);
}

#[tokio::test]
async fn test_file_is_pretty_json_array() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("saved_entries.json");
    let store = JsonFileStore::new(&path);
    store.append(entry("Wonder", Some(9))).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[\n  {"));

    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value[0]["date"], "2024-06-02");
    assert_eq!(value[0]["book_title"], "Wonder");
    assert_eq!(value[0]["rating"], 9);
}

#[tokio::test]
async fn test_corrupt_file_reports_error_on_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("saved_entries.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(
        store.load().await,
        Err(Error::CorruptStore { .. })
    ));
}

#[tokio::test]
async fn test_append_replaces_corrupt_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("saved_entries.json");
    std::fs::write(&path, "garbage").unwrap();

    let store = JsonFileStore::new(&path);
    assert_eq!(store.append(entry("Frindle", Some(6))).await.unwrap(), 0);

    let entries = store.load().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].book_title, "Frindle");
}

#[tokio::test]
async fn test_loads_file_without_parsed_sections() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("saved_entries.json");
    std::fs::write(
        &path,
        r#"[
  {
    "date": "2023-11-20",
    "book_title": "The Giver",
    "writeup": "Jonas learns the truth.",
    "feedback": "Score: 7",
    "rating": 7
  },
  {
    "date": "2023-11-22",
    "book_title": "Hatchet",
    "writeup": "Brian survives.",
    "feedback": "Nice work",
    "rating": null
  }
]"#,
    )
    .unwrap();

    let store = JsonFileStore::new(&path);
    let entries = store.load().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].rating, Some(7));
    assert_eq!(entries[1].rating, None);
    assert!(entries[0].reference_summary.is_none());

    // Appending keeps the existing records
    store.append(entry("Wonder", Some(9))).await.unwrap();
    assert_eq!(store.load().await.unwrap().len(), 3);
}
