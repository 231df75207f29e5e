//! SQL schema for the clipboard SQLite store.
//!
//! Executed at connection startup. Setup is idempotent: the table is created
//! if absent, columns added after the first release are back-filled onto older
//! tables, and the one-time legacy migration is gated on `PRAGMA user_version`.

use rusqlite::Connection;

use crate::legacy;

/// Version stamped into `PRAGMA user_version` once the legacy migration and
/// the numbering index are in place.
pub const SCHEMA_VERSION: i64 = 1;

const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
";

/// `item_number` keeps the legacy column name; it holds the item's dense
/// 1-based sequence number.
const TABLE: &str = "
CREATE TABLE IF NOT EXISTS clipboard_items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    item_number INTEGER NOT NULL,
    content     TEXT    NOT NULL,
    annotation  TEXT,
    created_at  TEXT    NOT NULL,   -- RFC 3339 UTC; server-assigned
    updated_at  TEXT                -- RFC 3339 UTC; NULL until first edit
);
";

/// Columns missing from tables written by older releases.
const LATE_COLUMNS: &[(&str, &str)] = &[
  ("annotation", "TEXT"),
  ("updated_at", "TEXT"),
];

const INDEXES: &str = "
CREATE UNIQUE INDEX IF NOT EXISTS clipboard_items_number_idx
    ON clipboard_items(item_number);
";

/// What [`ensure`] changed. Column-add failures are the expected outcome on
/// an up-to-date table, so they are reported here instead of as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
  pub added_columns:        Vec<&'static str>,
  /// Columns whose `ALTER TABLE` failed, with the SQLite message.
  pub skipped_columns:      Vec<(&'static str, String)>,
  /// Whether the legacy migration ran on this open.
  pub migrated:             bool,
  /// Rows whose timestamps were rewritten by the migration.
  pub timestamps_rewritten: usize,
  /// Rows whose sequence number was changed by the migration.
  pub numbers_rewritten:    usize,
}

pub fn ensure(conn: &mut Connection) -> rusqlite::Result<SchemaReport> {
  conn.execute_batch(PRAGMAS)?;
  conn.execute_batch(TABLE)?;

  let mut report = SchemaReport::default();

  for &(name, ty) in LATE_COLUMNS {
    match conn.execute_batch(&format!(
      "ALTER TABLE clipboard_items ADD COLUMN {name} {ty}"
    )) {
      Ok(()) => report.added_columns.push(name),
      Err(e) => report.skipped_columns.push((name, e.to_string())),
    }
  }

  let version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
  if version < SCHEMA_VERSION {
    let tx = conn.transaction()?;
    report.timestamps_rewritten = legacy::normalize_timestamps(&tx)?;
    report.numbers_rewritten = legacy::compact_numbers(&tx)?;
    tx.execute_batch(INDEXES)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    report.migrated = true;
  }

  Ok(report)
}
