//! Encoding and decoding helpers between [`Item`] and the plain-text columns
//! stored in SQLite.
//!
//! Timestamps are stored as RFC 3339 strings in UTC. Older databases may hold
//! other formats; those are rewritten once by [`crate::legacy`] and never
//! reach this module.

use chrono::{DateTime, Utc};
use clip_core::Item;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawItem::from_row`].
pub const ITEM_COLUMNS: &str =
  "id, item_number, content, annotation, created_at, updated_at";

/// Raw values read directly from a `clipboard_items` row.
pub struct RawItem {
  pub id:          i64,
  pub item_number: i64,
  pub content:     String,
  pub annotation:  Option<String>,
  pub created_at:  String,
  pub updated_at:  Option<String>,
}

impl RawItem {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      item_number: row.get(1)?,
      content:     row.get(2)?,
      annotation:  row.get(3)?,
      created_at:  row.get(4)?,
      updated_at:  row.get(5)?,
    })
  }

  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      id:              self.id,
      sequence_number: self.item_number,
      content:         self.content,
      annotation:      self.annotation,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      self.updated_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}
