//! Async HTTP client for the clipboard server.

use anyhow::{Context, Result, anyhow};
use clip_core::{Item, ItemId};
use reqwest::{Client, Response, redirect::Policy};
use std::time::Duration;

/// Async HTTP client for the clipboard server.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: &str) -> Result<Self> {
    // Form actions answer with a redirect to the HTML page; the status is all
    // we need, so don't follow it.
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .redirect(Policy::none())
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

  // ── JSON API ──────────────────────────────────────────────────────────────

  /// `GET /api/items`
  pub async fn list(&self) -> Result<Vec<Item>> {
    let resp = self
      .client
      .get(self.url("/api/items"))
      .send()
      .await
      .context("GET /api/items failed")?;
    let resp = ensure_success(resp, "GET /api/items").await?;
    resp.json().await.context("deserialising items")
  }

  /// `POST /api/items`
  pub async fn add(&self, content: String) -> Result<Item> {
    let resp = self
      .client
      .post(self.url("/api/items"))
      .body(content)
      .send()
      .await
      .context("POST /api/items failed")?;
    let resp = ensure_success(resp, "POST /api/items").await?;
    resp.json().await.context("deserialising created item")
  }

  /// `DELETE /api/items/{id}`
  pub async fn delete(&self, id: ItemId) -> Result<()> {
    let path = format!("/api/items/{id}");
    let resp = self
      .client
      .delete(self.url(&path))
      .send()
      .await
      .with_context(|| format!("DELETE {path} failed"))?;
    ensure_success(resp, &format!("DELETE {path}")).await?;
    Ok(())
  }

  // ── Form endpoints ────────────────────────────────────────────────────────

  /// `POST /update/{id}`
  pub async fn update(&self, id: ItemId, content: &str) -> Result<Item> {
    let path = format!("/update/{id}");
    let resp = self
      .client
      .post(self.url(&path))
      .form(&[("content", content)])
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    let resp = ensure_success(resp, &format!("POST {path}")).await?;
    resp.json().await.context("deserialising updated item")
  }

  /// `POST /update/annotation/{id}`
  pub async fn annotate(&self, id: ItemId, annotation: &str) -> Result<Item> {
    let path = format!("/update/annotation/{id}");
    let resp = self
      .client
      .post(self.url(&path))
      .form(&[("annotation", annotation)])
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    let resp = ensure_success(resp, &format!("POST {path}")).await?;
    resp.json().await.context("deserialising updated item")
  }

  /// `POST /delete/bulk`
  pub async fn delete_bulk(&self, ids: &[ItemId]) -> Result<()> {
    let joined = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
    let resp = self
      .client
      .post(self.url("/delete/bulk"))
      .form(&[("ids", joined)])
      .send()
      .await
      .context("POST /delete/bulk failed")?;
    ensure_redirect(resp, "POST /delete/bulk").await
  }

  /// `POST /clear`
  pub async fn clear(&self) -> Result<()> {
    let resp = self
      .client
      .post(self.url("/clear"))
      .send()
      .await
      .context("POST /clear failed")?;
    ensure_redirect(resp, "POST /clear").await
  }
}

async fn ensure_success(resp: Response, what: &str) -> Result<Response> {
  if resp.status().is_success() {
    return Ok(resp);
  }
  Err(error_from(resp, what).await)
}

async fn ensure_redirect(resp: Response, what: &str) -> Result<()> {
  if resp.status().is_redirection() || resp.status().is_success() {
    return Ok(());
  }
  Err(error_from(resp, what).await)
}

/// Build an error from a non-success response, preferring the server's
/// `{"error": ...}` message when present.
async fn error_from(resp: Response, what: &str) -> anyhow::Error {
  #[derive(serde::Deserialize)]
  struct ErrorBody {
    error: String,
  }

  let status = resp.status();
  match resp.json::<ErrorBody>().await {
    Ok(body) => anyhow!("{what} → {status}: {}", body.error),
    Err(_) => anyhow!("{what} → {status}"),
  }
}
