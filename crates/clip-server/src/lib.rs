//! HTTP front end for the clipboard history.
//!
//! Serves the HTML page and its form actions, and nests the JSON API from
//! [`clip_api`] under `/api`. Everything is generic over [`ClipboardStore`].

pub mod handlers;
pub mod render;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use clip_core::store::ClipboardStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{delete, page, update};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CLIP_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: ClipboardStore + 'static,
{
  Router::new()
    .route("/",                       get(page::index::<S>))
    .route("/add",                    post(page::add::<S>))
    .route("/delete/bulk",            post(delete::bulk::<S>))
    .route("/delete/{id}",            post(delete::one::<S>))
    .route("/clear",                  post(delete::clear::<S>))
    .route("/update/{id}",            post(update::content::<S>))
    .route("/update/annotation/{id}", post(update::annotation::<S>))
    .with_state(store.clone())
    .nest("/api", clip_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
