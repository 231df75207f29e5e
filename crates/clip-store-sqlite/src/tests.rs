//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use chrono::{Local, TimeZone, Utc};
use clip_core::{Item, store::{ClipboardStore, StoreError}};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn store_with(contents: &[&str]) -> (SqliteStore, Vec<Item>) {
  let s = store().await;
  let mut items = Vec::new();
  for c in contents {
    items.push(s.add((*c).to_string()).await.unwrap());
  }
  (s, items)
}

/// Sequence numbers keyed by id, in id order.
async fn numbers(s: &SqliteStore) -> Vec<(i64, i64)> {
  let mut items = s.list().await.unwrap();
  items.sort_by_key(|i| i.id);
  items.into_iter().map(|i| (i.id, i.sequence_number)).collect()
}

async fn assert_dense(s: &SqliteStore) {
  let mut seqs: Vec<i64> = s
    .list()
    .await
    .unwrap()
    .into_iter()
    .map(|i| i.sequence_number)
    .collect();
  seqs.sort_unstable();
  let n = s.count().await.unwrap() as i64;
  assert_eq!(seqs, (1..=n).collect::<Vec<_>>());
}

// ─── Add / list ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_returns_fresh_item() {
  let s = store().await;
  let before = Utc::now();

  let item = s.add("hello".into()).await.unwrap();

  assert_eq!(item.content, "hello");
  assert_eq!(item.sequence_number, 1);
  assert!(item.annotation.is_none());
  assert!(item.updated_at.is_none());
  assert!(item.created_at >= before - chrono::Duration::seconds(1));
  assert!(item.created_at <= Utc::now() + chrono::Duration::seconds(1));
}

#[tokio::test]
async fn add_appends_next_sequence_number() {
  let (s, items) = store_with(&["a", "b", "c"]).await;
  let seqs: Vec<i64> = items.iter().map(|i| i.sequence_number).collect();
  assert_eq!(seqs, vec![1, 2, 3]);

  let next = s.add("d".into()).await.unwrap();
  assert_eq!(next.sequence_number, 4);
}

#[tokio::test]
async fn list_is_newest_first() {
  let (s, items) = store_with(&["first", "second", "third"]).await;
  let listed = s.list().await.unwrap();

  let ids: Vec<i64> = listed.iter().map(|i| i.id).collect();
  let mut expected: Vec<i64> = items.iter().map(|i| i.id).collect();
  expected.reverse();
  assert_eq!(ids, expected);
  assert_eq!(listed[0].content, "third");
}

#[tokio::test]
async fn list_empty_store() {
  let s = store().await;
  assert!(s.list().await.unwrap().is_empty());
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn concurrent_adds_never_share_a_number() {
  let s = store().await;

  let handles: Vec<_> = (0..16)
    .map(|n| {
      let s = s.clone();
      tokio::spawn(async move { s.add(format!("item {n}")).await.unwrap() })
    })
    .collect();
  for h in handles {
    h.await.unwrap();
  }

  assert_eq!(s.count().await.unwrap(), 16);
  assert_dense(&s).await;
}

// ─── Delete / renumbering ────────────────────────────────────────────────────

#[tokio::test]
async fn delete_smallest_shifts_everything_down() {
  let (s, items) = store_with(&["a", "b", "c", "d"]).await;

  s.delete(items[0].id).await.unwrap();

  assert_eq!(
    numbers(&s).await,
    vec![(items[1].id, 1), (items[2].id, 2), (items[3].id, 3)]
  );
}

#[tokio::test]
async fn delete_largest_shifts_nothing() {
  let (s, items) = store_with(&["a", "b", "c"]).await;

  s.delete(items[2].id).await.unwrap();

  assert_eq!(numbers(&s).await, vec![(items[0].id, 1), (items[1].id, 2)]);
}

#[tokio::test]
async fn delete_middle_closes_the_gap() {
  let (s, items) = store_with(&["a", "b", "c", "d", "e"]).await;

  s.delete(items[2].id).await.unwrap();

  assert_eq!(
    numbers(&s).await,
    vec![
      (items[0].id, 1),
      (items[1].id, 2),
      (items[3].id, 3),
      (items[4].id, 4),
    ]
  );
}

#[tokio::test]
async fn delete_unknown_id_errors_and_changes_nothing() {
  let (s, _) = store_with(&["a", "b"]).await;
  let before = numbers(&s).await;

  let err = s.delete(999).await.unwrap_err();
  assert!(matches!(err, Error::ItemNotFound(999)));
  assert!(err.is_not_found());

  assert_eq!(numbers(&s).await, before);
}

#[tokio::test]
async fn numbering_stays_dense_across_mixed_operations() {
  let s = store().await;
  let mut live = Vec::new();

  for round in 0..5 {
    for n in 0..4 {
      live.push(s.add(format!("{round}-{n}")).await.unwrap().id);
    }
    // Remove one from the front and one from the back each round.
    let front = live.remove(0);
    s.delete(front).await.unwrap();
    let back = live.pop().unwrap();
    s.delete(back).await.unwrap();
    assert_dense(&s).await;
  }

  assert_eq!(s.count().await.unwrap(), live.len() as u64);
}

#[tokio::test]
async fn ids_are_never_reused() {
  let (s, items) = store_with(&["a", "b"]).await;
  s.delete(items[1].id).await.unwrap();

  let c = s.add("c".into()).await.unwrap();
  assert!(c.id > items[1].id);
  assert_eq!(c.sequence_number, 2);
}

// ─── Bulk delete ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn bulk_delete_skips_garbage_and_removes_valid_ids() {
  let (s, items) = store_with(&["a", "b", "c", "d", "e"]).await;
  let raw = format!("{}, abc, {}", items[1].id, items[4].id);

  let report = s.delete_bulk(&raw).await;

  assert_eq!(report.deleted, vec![items[1].id, items[4].id]);
  assert_eq!(report.skipped, vec!["abc".to_string()]);
  assert!(report.failed.is_empty());
  assert_eq!(s.count().await.unwrap(), 3);
  assert_dense(&s).await;
}

#[tokio::test]
async fn bulk_delete_continues_past_unknown_ids() {
  let (s, items) = store_with(&["a", "b", "c"]).await;
  let raw = format!("{}, 404, {}", items[0].id, items[2].id);

  let report = s.delete_bulk(&raw).await;

  assert_eq!(report.deleted, vec![items[0].id, items[2].id]);
  assert_eq!(report.failed.len(), 1);
  assert_eq!(report.failed[0].0, 404);
  assert!(!report.is_clean());

  let remaining = s.list().await.unwrap();
  assert_eq!(remaining.len(), 1);
  assert_eq!(remaining[0].id, items[1].id);
  assert_eq!(remaining[0].sequence_number, 1);
}

#[tokio::test]
async fn bulk_delete_repeated_id_fails_second_time() {
  let (s, items) = store_with(&["a", "b"]).await;
  let raw = format!("{0},{0}", items[0].id);

  let report = s.delete_bulk(&raw).await;

  assert_eq!(report.deleted, vec![items[0].id]);
  assert_eq!(report.failed.len(), 1);
  assert_eq!(s.count().await.unwrap(), 1);
}

// ─── Updates ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_overwrites_content_and_stamps_updated_at() {
  let (s, items) = store_with(&["old text"]).await;
  assert!(items[0].updated_at.is_none());

  let updated = s.update(items[0].id, "new text".into()).await.unwrap();
  assert_eq!(updated.content, "new text");
  assert!(updated.updated_at.is_some());

  let fetched = s.get(items[0].id).await.unwrap().unwrap();
  assert_eq!(fetched.content, "new text");
  assert!(fetched.updated_at.is_some());
  assert_eq!(fetched.created_at, items[0].created_at);
  assert_eq!(fetched.sequence_number, items[0].sequence_number);
}

#[tokio::test]
async fn update_unknown_id_errors() {
  let s = store().await;
  let err = s.update(7, "x".into()).await.unwrap_err();
  assert!(matches!(err, Error::ItemNotFound(7)));
}

#[tokio::test]
async fn update_annotation_leaves_updated_at_alone() {
  let (s, items) = store_with(&["snippet"]).await;

  let annotated = s
    .update_annotation(items[0].id, "from the design review".into())
    .await
    .unwrap();
  assert_eq!(annotated.annotation.as_deref(), Some("from the design review"));
  assert!(annotated.updated_at.is_none());
  assert_eq!(annotated.content, "snippet");
}

#[tokio::test]
async fn update_annotation_accepts_empty_string() {
  let (s, items) = store_with(&["snippet"]).await;
  s.update_annotation(items[0].id, "note".into()).await.unwrap();

  let cleared = s.update_annotation(items[0].id, String::new()).await.unwrap();
  assert_eq!(cleared.annotation.as_deref(), Some(""));
}

#[tokio::test]
async fn update_annotation_unknown_id_errors() {
  let s = store().await;
  let err = s.update_annotation(3, "x".into()).await.unwrap_err();
  assert!(err.is_not_found());
}

// ─── Clear / count ───────────────────────────────────────────────────────────

#[tokio::test]
async fn clear_empties_and_numbering_restarts() {
  let (s, items) = store_with(&["a", "b", "c"]).await;

  s.clear().await.unwrap();
  assert_eq!(s.count().await.unwrap(), 0);

  let fresh = s.add("again".into()).await.unwrap();
  assert_eq!(fresh.sequence_number, 1);
  assert!(fresh.id > items[2].id);
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_schema_is_idempotent() {
  let (s, _) = store_with(&["a", "b"]).await;

  let report = s.ensure_schema().await.unwrap();
  assert!(report.added_columns.is_empty());
  assert_eq!(report.skipped_columns.len(), 2);
  assert!(!report.migrated);

  assert_eq!(s.count().await.unwrap(), 2);
  assert_dense(&s).await;
}

#[tokio::test]
async fn legacy_database_is_migrated_on_open() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("legacy.db");

  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn
      .execute_batch(
        "CREATE TABLE clipboard_items (
           id          INTEGER PRIMARY KEY AUTOINCREMENT,
           item_number INTEGER NOT NULL,
           content     TEXT NOT NULL,
           created_at  TIMESTAMP NOT NULL
         );
         INSERT INTO clipboard_items (item_number, content, created_at)
           VALUES (1, 'a', '2024-05-01 10:00:00');
         INSERT INTO clipboard_items (item_number, content, created_at)
           VALUES (1, 'b', 1717243200000);
         INSERT INTO clipboard_items (item_number, content, created_at)
           VALUES (3, 'c', 'not a date');",
      )
      .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let report = s.ensure_schema().await.unwrap();
  // The open already migrated; a second pass finds nothing to do.
  assert!(!report.migrated);

  let items = s.list().await.unwrap();
  let by_content = |c: &str| items.iter().find(|i| i.content == c).unwrap().clone();

  let a = by_content("a");
  let b = by_content("b");
  let c = by_content("c");

  // Naive legacy text is local wall time.
  let a_local = Local.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).earliest().unwrap();
  assert_eq!(a.created_at, a_local.with_timezone(&Utc));
  assert_eq!(b.created_at, Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
  assert_eq!(c.created_at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

  assert_eq!(
    (a.sequence_number, b.sequence_number, c.sequence_number),
    (1, 2, 3)
  );
  assert!(a.annotation.is_none());
  assert!(a.updated_at.is_none());

  // New writes behave normally on the migrated table.
  s.update_annotation(a.id, "kept".into()).await.unwrap();
  let d = s.add("d".into()).await.unwrap();
  assert_eq!(d.sequence_number, 4);
  s.delete(a.id).await.unwrap();
  assert_dense(&s).await;
}

#[tokio::test]
async fn legacy_migration_reports_added_columns() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("legacy.db");

  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn
      .execute_batch(
        "CREATE TABLE clipboard_items (
           id          INTEGER PRIMARY KEY AUTOINCREMENT,
           item_number INTEGER NOT NULL,
           content     TEXT NOT NULL,
           created_at  TIMESTAMP NOT NULL
         );",
      )
      .unwrap();
  }

  let conn = tokio_rusqlite::Connection::open(&path).await.unwrap();
  let report = conn
    .call(|conn| Ok(crate::schema::ensure(conn)?))
    .await
    .unwrap();

  assert_eq!(report.added_columns, vec!["annotation", "updated_at"]);
  assert!(report.skipped_columns.is_empty());
  assert!(report.migrated);
}
