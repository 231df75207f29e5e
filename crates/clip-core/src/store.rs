//! The `ClipboardStore` trait.
//!
//! Implemented by storage backends (e.g. `clip-store-sqlite`). The HTTP layers
//! (`clip-api`, `clip-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  bulk::BulkDeleteReport,
  item::{Item, ItemId},
};

/// Bound on backend error types so callers can tell a missing item apart from
/// a storage failure without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_not_found(&self) -> bool;
}

/// Abstraction over a clipboard history backend.
///
/// Every backend maintains the numbering invariant: after any sequence of
/// operations the sequence numbers in use are exactly `{1..count()}`.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ClipboardStore: Send + Sync {
  type Error: StoreError;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All items, newest first (`id` descending).
  fn list(&self) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  /// A single item by id. Returns `None` if not found.
  fn get(
    &self,
    id: ItemId,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Number of stored items.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Append an item with the next sequence number.
  ///
  /// `content` is expected to have passed
  /// [`validate_content`](crate::item::validate_content); the store does not
  /// re-check it.
  fn add(
    &self,
    content: String,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Overwrite an item's content and stamp `updated_at`.
  fn update(
    &self,
    id: ItemId,
    content: String,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Overwrite an item's annotation. `updated_at` is left alone.
  fn update_annotation(
    &self,
    id: ItemId,
    annotation: String,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Delete one item and shift every later sequence number down by one.
  /// The delete and the renumbering are applied atomically.
  fn delete(&self, id: ItemId) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete every id in a comma-separated list, best effort.
  ///
  /// Unparseable entries and per-id failures are collected in the report;
  /// they never abort the remaining deletions and are never returned as an
  /// error.
  fn delete_bulk<'a>(
    &'a self,
    ids: &'a str,
  ) -> impl Future<Output = BulkDeleteReport> + Send + 'a;

  /// Remove every item.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
