//! Item: one stored clipboard entry.
//!
//! An item carries two identities: an immutable `id` assigned by the store and
//! never reused, and a `sequence_number` that tracks display order and shifts
//! down whenever an earlier item is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Store-assigned row identifier. Monotonically increasing, never reused.
pub type ItemId = i64;

/// A clipboard entry as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub id:              ItemId,
  /// Dense 1-based position; the set in use is always `{1..N}`.
  pub sequence_number: i64,
  pub content:         String,
  pub annotation:      Option<String>,
  /// Server-assigned; never changes after creation.
  pub created_at:      DateTime<Utc>,
  /// Stamped on every content write; `None` until the first update.
  pub updated_at:      Option<DateTime<Utc>>,
}

/// Trim `input` and reject it if nothing is left.
///
/// Stores assume content has already passed through here; every entry point
/// that adds or rewrites content calls it first.
pub fn validate_content(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(Error::EmptyContent);
  }
  Ok(trimmed.to_owned())
}
