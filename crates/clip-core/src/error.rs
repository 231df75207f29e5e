//! Error types for `clip-core`.

use thiserror::Error;

use crate::item::ItemId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("item not found: {0}")]
  ItemNotFound(ItemId),

  /// Content was empty or whitespace-only after trimming.
  #[error("content must not be blank")]
  EmptyContent,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
