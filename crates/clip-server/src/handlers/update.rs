//! `POST /update/{id}` and `POST /update/annotation/{id}`.
//!
//! Both are called by the page's inline editors and answer with the updated
//! [`Item`] as JSON.

use std::sync::Arc;

use axum::{
  Form, Json,
  extract::{Path, State},
};
use clip_api::ApiError;
use clip_core::{Item, ItemId, store::ClipboardStore, validate_content};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ContentForm {
  #[serde(default)]
  pub content: String,
}

/// `POST /update/{id}`: 400 on blank content.
pub async fn content<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<ItemId>,
  Form(form): Form<ContentForm>,
) -> Result<Json<Item>, ApiError>
where
  S: ClipboardStore,
{
  let content = validate_content(&form.content)?;
  let item = store.update(id, content).await.map_err(ApiError::from_store)?;
  Ok(Json(item))
}

#[derive(Debug, Deserialize)]
pub struct AnnotationForm {
  #[serde(default)]
  pub annotation: String,
}

/// `POST /update/annotation/{id}`: an empty annotation is stored as-is.
pub async fn annotation<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<ItemId>,
  Form(form): Form<AnnotationForm>,
) -> Result<Json<Item>, ApiError>
where
  S: ClipboardStore,
{
  let item = store
    .update_annotation(id, form.annotation)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(item))
}
