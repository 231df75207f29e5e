//! SQLite backend for the clipboard history store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod legacy;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use schema::SchemaReport;
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
