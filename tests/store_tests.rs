//! SQLite store behavior under concurrency and across reopen.

use std::collections::HashSet;
use std::sync::Arc;

use gymlog::adapter::outbound::sqlite::database::connection::open;
use gymlog::adapter::outbound::sqlite::SqliteJournalStore;
use gymlog::domain::TelegramId;
use gymlog::port::outbound::store::JournalStore;
use gymlog::testkit::domain::{date, new_entry};
use gymlog::testkit::TempJournalDb;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_inserts_return_their_own_rows() {
    let db = TempJournalDb::new();
    let store = Arc::new(db.store());
    let user = store.get_or_create_user(TelegramId::new(7)).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..10 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            let weight = f64::from(40 + i);
            let entry = store
                .add_entry(new_entry(user, "присед", Some(weight), Some(5), "2026-03-10 18:00"))
                .await
                .unwrap();
            (weight, entry)
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        let (weight, entry) = task.await.unwrap();
        assert_eq!(entry.weight, Some(weight), "returned id must match the inserted row");
        assert!(ids.insert(entry.id));
    }

    assert_eq!(store.all_entries(user).await.unwrap().len(), 10);
    assert_eq!(store.training_count(user).await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_contact_registers_once() {
    let db = TempJournalDb::new();
    let store = Arc::new(db.store());

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            store.get_or_create_user(TelegramId::new(42)).await.unwrap()
        }));
    }

    let mut users = HashSet::new();
    for task in tasks {
        users.insert(task.await.unwrap());
    }
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn journal_survives_reopen() {
    let db = TempJournalDb::new();
    let user = {
        let store = db.store();
        let user = store.get_or_create_user(TelegramId::new(1)).await.unwrap();
        store
            .add_entry(new_entry(user, "жим лежа", Some(80.0), Some(5), "2026-03-09 19:00"))
            .await
            .unwrap();
        user
    };

    let reopened = SqliteJournalStore::new(open(&db.path()).unwrap());
    assert_eq!(
        reopened.find_user(TelegramId::new(1)).await.unwrap(),
        Some(user)
    );
    assert_eq!(
        reopened.last_entry_date(user).await.unwrap(),
        Some(date("2026-03-09"))
    );
}
