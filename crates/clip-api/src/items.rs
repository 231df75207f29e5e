//! Handlers for `/items` endpoints.
//!
//! | Method   | Path         | Notes |
//! |----------|--------------|-------|
//! | `GET`    | `/items`     | All items, newest first |
//! | `POST`   | `/items`     | Raw body is the content; returns 201 + stored item |
//! | `DELETE` | `/items/:id` | 204; renumbers later items |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use clip_core::{Item, ItemId, store::ClipboardStore, validate_content};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /items`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Item>>, ApiError>
where
  S: ClipboardStore,
{
  let items = store.list().await.map_err(ApiError::from_store)?;
  Ok(Json(items))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /items`: the request body is taken verbatim as the content, then
/// trimmed. Returns 201 + the stored [`Item`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: String,
) -> Result<impl IntoResponse, ApiError>
where
  S: ClipboardStore,
{
  let content = validate_content(&body)?;
  let item = store.add(content).await.map_err(|e| {
    tracing::warn!(error = %e, "failed to add item");
    ApiError::from_store(e)
  })?;
  Ok((StatusCode::CREATED, Json(item)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /items/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<ItemId>,
) -> Result<StatusCode, ApiError>
where
  S: ClipboardStore,
{
  store.delete(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
