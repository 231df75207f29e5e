//! `GET /` and `POST /add`.

use std::sync::Arc;

use axum::{
  Form,
  extract::State,
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use clip_api::ApiError;
use clip_core::{store::ClipboardStore, validate_content};
use serde::Deserialize;

use crate::{handlers::back_to_index, render};

/// `GET /`: the full list, newest first.
pub async fn index<S>(State(store): State<Arc<S>>) -> Result<Html<String>, ApiError>
where
  S: ClipboardStore,
{
  let items = store.list().await.map_err(ApiError::from_store)?;
  Ok(Html(render::index(&items, None)))
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
  #[serde(default)]
  pub content: String,
}

/// `POST /add`: blank input is dropped silently. A storage failure
/// re-renders the page with the error in a banner instead of redirecting.
pub async fn add<S>(
  State(store): State<Arc<S>>,
  Form(form): Form<AddForm>,
) -> Response
where
  S: ClipboardStore,
{
  let Ok(content) = validate_content(&form.content) else {
    return back_to_index().into_response();
  };

  let err = match store.add(content).await {
    Ok(item) => {
      tracing::debug!(id = item.id, number = item.sequence_number, "added item");
      return back_to_index().into_response();
    }
    Err(e) => e,
  };

  tracing::warn!(error = %err, "failed to add item");
  let banner = format!("Failed to add item: {err}");

  match store.list().await {
    Ok(items) => (
      StatusCode::INTERNAL_SERVER_ERROR,
      Html(render::index(&items, Some(&banner))),
    )
      .into_response(),
    Err(e) => ApiError::from_store(e).into_response(),
  }
}
