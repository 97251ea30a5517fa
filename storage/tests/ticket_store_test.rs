//! Integration tests for [`storage::SqliteTicketStore`].
//!
//! Covers insert, per-chat lookup and counting using in-memory and file-backed SQLite databases.

use chrono::{TimeZone, Utc};
use storage::{SqliteTicketStore, TicketRecord, TicketStore};

fn record(chat_id: i64, caption: &str) -> TicketRecord {
    TicketRecord::new(
        chat_id,
        "private",
        caption,
        format!("https://res.cloudinary.com/demo/image/upload/{}.jpg", chat_id),
        Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap(),
    )
}

/// **Test: Inserted record is read back verbatim.**
///
/// **Setup:** In-memory DB.
/// **Action:** insert one record, `find_by_chat(555)`.
/// **Expected:** one record equal to the inserted one.
#[tokio::test]
async fn test_insert_and_find_by_chat() {
    let store = SqliteTicketStore::new("sqlite::memory:")
        .await
        .expect("Failed to create store");

    let ticket = record(555, "Broken AC unit 3F");
    store.insert(&ticket).await.expect("Failed to insert");

    let found = store.find_by_chat(555).await.expect("Failed to query");
    assert_eq!(found, vec![ticket]);
}

/// **Test: Records are scoped per chat and duplicates are kept.**
///
/// **Setup:** Two records for chat 1 (same caption), one for chat 2.
/// **Expected:** count is 3; chat 1 has two records; chat 3 has none.
#[tokio::test]
async fn test_records_are_appended_per_chat() {
    let store = SqliteTicketStore::new("sqlite::memory:")
        .await
        .expect("Failed to create store");

    store.insert(&record(1, "Leak")).await.unwrap();
    store.insert(&record(1, "Leak")).await.unwrap();
    store.insert(&record(2, "Door")).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 3);
    assert_eq!(store.find_by_chat(1).await.unwrap().len(), 2);
    assert!(store.find_by_chat(3).await.unwrap().is_empty());
}

/// **Test: File-backed store survives reopening.**
#[tokio::test]
async fn test_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickets.db");
    let url = path.to_str().unwrap().to_string();

    {
        let store = SqliteTicketStore::new(&url).await.unwrap();
        store.insert(&record(7, "Window")).await.unwrap();
    }

    let reopened = SqliteTicketStore::new(&url).await.unwrap();
    let found = reopened.find_by_chat(7).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].caption, "Window");
}
