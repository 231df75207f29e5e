//! JSON REST API for the clipboard history.
//!
//! Exposes an axum [`Router`] backed by any [`clip_core::store::ClipboardStore`].
//! Transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", clip_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod items;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get},
};
use clip_core::store::ClipboardStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ClipboardStore + 'static,
{
  Router::new()
    .route("/items", get(items::list::<S>).post(items::create::<S>))
    .route("/items/{id}", delete(items::delete_one::<S>))
    .with_state(store)
}
