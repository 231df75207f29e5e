//! Best-effort bulk deletion: id-list parsing and the per-id outcome report.

use serde::{Deserialize, Serialize};

use crate::item::ItemId;

/// Split a comma-separated id list into parsed ids and the raw entries that
/// did not parse.
///
/// Entries are trimmed first. Blank entries (e.g. from a trailing comma) are
/// dropped without being reported.
pub fn parse_id_list(raw: &str) -> (Vec<ItemId>, Vec<String>) {
  let mut ids = Vec::new();
  let mut skipped = Vec::new();

  for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
    match entry.parse::<ItemId>() {
      Ok(id) => ids.push(id),
      Err(_) => skipped.push(entry.to_owned()),
    }
  }

  (ids, skipped)
}

/// Outcome of [`crate::store::ClipboardStore::delete_bulk`].
///
/// Bulk deletion never fails as a whole; callers that care about partial
/// failure inspect `skipped` and `failed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteReport {
  /// Ids that were deleted, in request order.
  pub deleted: Vec<ItemId>,
  /// Raw entries that were not valid ids.
  pub skipped: Vec<String>,
  /// Ids whose deletion failed, with the error message.
  pub failed:  Vec<(ItemId, String)>,
}

impl BulkDeleteReport {
  /// `true` when every entry was parsed and deleted.
  pub fn is_clean(&self) -> bool {
    self.skipped.is_empty() && self.failed.is_empty()
  }
}
