//! [`SqliteStore`]: the SQLite implementation of [`ClipboardStore`].

use std::path::Path;

use chrono::Utc;
use clip_core::{
  BulkDeleteReport, Item, ItemId, parse_id_list, store::ClipboardStore,
};
use rusqlite::{OptionalExtension as _, TransactionBehavior, params};

use crate::{
  Error, Result,
  encode::{ITEM_COLUMNS, RawItem, encode_dt},
  schema::{self, SchemaReport},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A clipboard history backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted, and every
/// clone funnels its queries through the same connection thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema setup.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.ensure_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.ensure_schema().await?;
    Ok(store)
  }

  /// Create the table if absent, back-fill late columns, and run the legacy
  /// migration if it has not run yet. Safe to call repeatedly.
  pub async fn ensure_schema(&self) -> Result<SchemaReport> {
    let report = self
      .conn
      .call(|conn| Ok(schema::ensure(conn)?))
      .await?;

    if report.migrated {
      tracing::info!(
        timestamps = report.timestamps_rewritten,
        numbers    = report.numbers_rewritten,
        "migrated clipboard_items to schema version {}",
        schema::SCHEMA_VERSION,
      );
    }
    for &column in &report.added_columns {
      tracing::info!(column, "added missing column to clipboard_items");
    }
    tracing::debug!(skipped = ?report.skipped_columns, "schema check complete");

    Ok(report)
  }
}

fn query_item(conn: &rusqlite::Connection, id: ItemId) -> rusqlite::Result<RawItem> {
  conn.query_row(
    &format!("SELECT {ITEM_COLUMNS} FROM clipboard_items WHERE id = ?1"),
    params![id],
    RawItem::from_row,
  )
}

// ─── ClipboardStore impl ─────────────────────────────────────────────────────

impl ClipboardStore for SqliteStore {
  type Error = Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list(&self) -> Result<Vec<Item>> {
    let raws: Vec<RawItem> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ITEM_COLUMNS} FROM clipboard_items ORDER BY id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawItem::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawItem::into_item).collect()
  }

  async fn get(&self, id: ItemId) -> Result<Option<Item>> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| Ok(query_item(conn, id).optional()?))
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM clipboard_items", [], |r| {
          r.get::<_, i64>(0)
        })?)
      })
      .await?;
    Ok(n as u64)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn add(&self, content: String) -> Result<Item> {
    let created_at = encode_dt(Utc::now());

    // Computing the next number and inserting share one IMMEDIATE
    // transaction, so two writers can never claim the same number.
    let raw: RawItem = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let next: i64 = tx.query_row(
          "SELECT COALESCE(MAX(item_number), 0) + 1 FROM clipboard_items",
          [],
          |r| r.get(0),
        )?;
        tx.execute(
          "INSERT INTO clipboard_items (item_number, content, created_at)
           VALUES (?1, ?2, ?3)",
          params![next, content, created_at],
        )?;
        let raw = query_item(&tx, tx.last_insert_rowid())?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_item()
  }

  async fn update(&self, id: ItemId, content: String) -> Result<Item> {
    let updated_at = encode_dt(Utc::now());

    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE clipboard_items SET content = ?1, updated_at = ?2 WHERE id = ?3",
          params![content, updated_at, id],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(Some(query_item(conn, id)?))
      })
      .await?;

    raw.ok_or(Error::ItemNotFound(id))?.into_item()
  }

  async fn update_annotation(&self, id: ItemId, annotation: String) -> Result<Item> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE clipboard_items SET annotation = ?1 WHERE id = ?2",
          params![annotation, id],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(Some(query_item(conn, id)?))
      })
      .await?;

    raw.ok_or(Error::ItemNotFound(id))?.into_item()
  }

  async fn delete(&self, id: ItemId) -> Result<()> {
    let found: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let number: Option<i64> = tx
          .query_row(
            "SELECT item_number FROM clipboard_items WHERE id = ?1",
            params![id],
            |r| r.get(0),
          )
          .optional()?;
        let Some(number) = number else {
          return Ok(false);
        };

        tx.execute("DELETE FROM clipboard_items WHERE id = ?1", params![id])?;

        // Shift down through negative values so the unique index on
        // item_number never sees two rows with the same number mid-update.
        tx.execute(
          "UPDATE clipboard_items SET item_number = -(item_number - 1)
           WHERE item_number > ?1",
          params![number],
        )?;
        tx.execute(
          "UPDATE clipboard_items SET item_number = -item_number
           WHERE item_number < 0",
          [],
        )?;

        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !found {
      return Err(Error::ItemNotFound(id));
    }
    Ok(())
  }

  async fn delete_bulk<'a>(&'a self, ids: &'a str) -> BulkDeleteReport {
    let (ids, skipped) = parse_id_list(ids);
    let mut report = BulkDeleteReport { skipped, ..Default::default() };

    // Each id is its own transaction; a failure never undoes earlier ones.
    for id in ids {
      match self.delete(id).await {
        Ok(()) => report.deleted.push(id),
        Err(e) => report.failed.push((id, e.to_string())),
      }
    }

    report
  }

  async fn clear(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute("DELETE FROM clipboard_items", [])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
