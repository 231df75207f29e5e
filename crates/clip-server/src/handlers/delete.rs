//! `POST /delete/{id}`, `POST /delete/bulk` and `POST /clear`.

use std::sync::Arc;

use axum::{
  Form,
  extract::{Path, State},
  response::Redirect,
};
use clip_api::ApiError;
use clip_core::{ItemId, store::ClipboardStore};
use serde::Deserialize;

use crate::handlers::back_to_index;

/// `POST /delete/{id}`
pub async fn one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<ItemId>,
) -> Result<Redirect, ApiError>
where
  S: ClipboardStore,
{
  store.delete(id).await.map_err(ApiError::from_store)?;
  Ok(back_to_index())
}

#[derive(Debug, Deserialize)]
pub struct BulkForm {
  /// Comma-joined ids, e.g. `3,7,12`.
  #[serde(default)]
  pub ids: String,
}

/// `POST /delete/bulk`: always redirects; partial failures are only logged.
pub async fn bulk<S>(
  State(store): State<Arc<S>>,
  Form(form): Form<BulkForm>,
) -> Redirect
where
  S: ClipboardStore,
{
  let report = store.delete_bulk(&form.ids).await;

  if report.is_clean() {
    tracing::info!(deleted = report.deleted.len(), "bulk delete");
  } else {
    tracing::warn!(
      deleted = report.deleted.len(),
      skipped = ?report.skipped,
      failed  = ?report.failed,
      "bulk delete finished with errors",
    );
  }

  back_to_index()
}

/// `POST /clear`
pub async fn clear<S>(State(store): State<Arc<S>>) -> Result<Redirect, ApiError>
where
  S: ClipboardStore,
{
  store.clear().await.map_err(ApiError::from_store)?;
  tracing::info!("cleared all items");
  Ok(back_to_index())
}
