//! End-to-end tests of the stage entry points
//!
//! Each stage is called directly with the previous stage's output, the way
//! an external scheduler would wire them.

use std::fs;
use surname_etl::adapters::database::RecordStore;
use surname_etl::adapters::memory::MemoryStore;
use surname_etl::core::extract::extract;
use surname_etl::core::load::load;
use surname_etl::core::stage::{read_staged, stage};
use surname_etl::core::transform::transform;
use surname_etl::domain::{EtlError, NormalizedRecord};
use tempfile::TempDir;

const ARCHIVE: &str = r#"{
    "name": "Dmitry Surname",
    "type": "personal_chat",
    "id": 4242,
    "messages": [
        {"id": 1, "type": "message", "date": "2024-01-01T00:00:00", "text": ""},
        {"id": 2, "type": "message", "date": "2024-01-01T00:01:00", "text": ["Anna", "Ivanova"]},
        {"id": 3, "type": "message", "date": "2024-01-01T00:02:00", "text": "John one two three four"},
        {"id": 4, "type": "message", "date": "2024-01-01T00:03:00", "text": "John one two three"},
        {"id": 5, "type": "message", "date": "2024-01-01T00:04:00", "text": "Solo"},
        {"id": 6, "type": "service", "date": "2024-01-01T00:05:00", "action": "pin_message"},
        {"id": 7, "type": "message", "date": "2024-01-01T00:06:00",
         "text": [{"type": "bold", "text": "Олег"}, " Сидоров"]}
    ]
}"#;

fn write_archive(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("result.json");
    fs::write(&path, ARCHIVE).unwrap();
    path
}

#[test]
fn test_transform_properties_on_archive() {
    let dir = TempDir::new().unwrap();
    let messages = extract(write_archive(&dir)).unwrap();
    assert_eq!(messages.len(), 7);

    let records = transform(&messages);

    assert_eq!(
        records,
        vec![
            NormalizedRecord::new(2, "2024-01-01T00:01:00", "Anna", "Ivanova"),
            NormalizedRecord::new(4, "2024-01-01T00:03:00", "John", "one two three"),
            NormalizedRecord::new(5, "2024-01-01T00:04:00", "Solo", ""),
            NormalizedRecord::new(7, "2024-01-01T00:06:00", "", ""),
        ]
    );

    // Deterministic across invocations
    assert_eq!(transform(&messages), records);
}

#[tokio::test]
async fn test_stages_compose() {
    let dir = TempDir::new().unwrap();
    let messages = extract(write_archive(&dir)).unwrap();
    let records = transform(&messages);

    let staged = stage(&records, dir.path().join("out")).unwrap();
    assert_eq!(read_staged(&staged).unwrap(), records);

    let store = MemoryStore::new("dmitry_surname");
    let first = load(&records, &store).await.unwrap();
    let second = load(&records, &store).await.unwrap();

    assert_eq!(first.inserted, 4);
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 4);
    assert_eq!(store.count_rows().await.unwrap(), 4);
    assert_eq!(store.rows(), records);
}

#[test]
fn test_unparseable_archive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("result.json");
    fs::write(&path, "{\"messages\": [").unwrap();

    let err = extract(&path).unwrap_err();
    assert!(matches!(err, EtlError::SourceUnavailable(_)));
    assert!(err.is_fatal());
}
