use chrono::Utc;
use datapack_state::{CatalogEntry, ContentRecord, JsonStore, MemoryStore, MetadataStore, StateError};
use tempfile::tempdir;

#[tokio::test]
async fn test_memory_store_roundtrip() {
    let store = MemoryStore::new();
    store
        .save_catalog_entry(CatalogEntry::new("entry-1", "Entry One"))
        .await
        .unwrap();

    let saved = store
        .save_content_record(ContentRecord::new("entry-1", "ABCD", Utc::now()))
        .await
        .unwrap();
    let id = saved.id.unwrap();

    assert_eq!(store.find_content_record_by_id(id).await.unwrap(), Some(saved));
    assert_eq!(store.find_content_records_by_entry("entry-1").await.unwrap().len(), 1);
    assert!(store.find_content_records_by_entry("entry-2").await.unwrap().is_empty());
    assert!(store.find_catalog_entry("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_json_store_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("meta").join("library.json");

    let record_id = {
        let store = JsonStore::open(&path).unwrap();
        let mut entry = CatalogEntry::new("entry-1", "Entry One");
        let mut record = ContentRecord::new("entry-1", "ABCD", Utc::now());
        record.present_on_disk = true;
        record.path = Some("entry-1-1.zip".into());
        let record = store.save_content_record(record).await.unwrap();
        entry.activate(&record);
        store.save_catalog_entry(entry).await.unwrap();
        record.id.unwrap()
    };

    let reopened = JsonStore::open(&path).unwrap();
    let entry = reopened.find_catalog_entry("entry-1").await.unwrap().unwrap();
    assert_eq!(entry.active_data_id, Some(record_id));
    assert!(entry.active_data_on_disk);

    let record = reopened.find_content_record_by_id(record_id).await.unwrap().unwrap();
    assert_eq!(record.path.as_deref(), Some("entry-1-1.zip"));

    let next = reopened
        .save_content_record(ContentRecord::new("entry-1", "EF01", Utc::now()))
        .await
        .unwrap();
    assert_eq!(next.id, Some(record_id + 1));
}

#[test]
fn test_json_store_rejects_corrupt_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.json");
    std::fs::write(&path, b"{ not json").unwrap();

    assert!(matches!(JsonStore::open(&path), Err(StateError::Parse { .. })));
}
