//! Error type for `clip-store-sqlite`.

use clip_core::{ItemId, store::StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Any failure reported by SQLite or the connection thread, carrying the
  /// original message.
  #[error("storage error: {0}")]
  Storage(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("item not found: {0}")]
  ItemNotFound(ItemId),
}

impl StoreError for Error {
  fn is_not_found(&self) -> bool { matches!(self, Error::ItemNotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
