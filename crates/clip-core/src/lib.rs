//! Core types and trait definitions for the clipboard history store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Every other crate in the workspace depends on it.

pub mod bulk;
pub mod error;
pub mod item;
pub mod store;

pub use bulk::{BulkDeleteReport, parse_id_list};
pub use error::{Error, Result};
pub use item::{Item, ItemId, validate_content};
