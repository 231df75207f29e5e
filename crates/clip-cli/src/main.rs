//! `clip`: command-line client for the clipboard history server.
//!
//! # Usage
//!
//! ```text
//! clip list
//! clip add "some text"
//! echo "piped text" | clip add
//! clip edit 12 "replacement"
//! clip annotate 12 "why this was saved"
//! clip rm 12 13
//! clip --url http://clipboard.lan:8080 clear
//! ```

mod client;

use std::{io::Read as _, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::ApiClient;
use clip_core::{Item, ItemId, validate_content};
use serde::Deserialize;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "clip", about = "Command-line client for the clipboard history")]
struct Args {
  /// Path to a TOML config file (`url = "..."`).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the clipboard server (default: http://localhost:8080).
  #[arg(long, env = "CLIP_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every item, newest first.
  List,
  /// Store a new item. Reads stdin when TEXT is omitted.
  Add { text: Option<String> },
  /// Replace an item's content.
  Edit { id: ItemId, text: String },
  /// Set an item's annotation; omit TEXT to clear it.
  Annotate {
    id:   ItemId,
    #[arg(default_value = "")]
    text: String,
  },
  /// Delete one or more items.
  Rm {
    #[arg(required = true)]
    ids: Vec<ItemId>,
  },
  /// Delete every item.
  Clear,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string());

  let client = ApiClient::new(&url)?;

  match args.command {
    Command::List => {
      let items = client.list().await?;
      if items.is_empty() {
        println!("(empty)");
      }
      for item in &items {
        println!("{}", format_item(item));
      }
    }
    Command::Add { text } => {
      let raw = match text {
        Some(t) => t,
        None => {
          let mut buf = String::new();
          std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
          buf
        }
      };
      let content = validate_content(&raw).context("nothing to add")?;
      let item = client.add(content).await?;
      println!("{}", format_item(&item));
    }
    Command::Edit { id, text } => {
      let content = validate_content(&text).context("refusing to store blank content")?;
      let item = client.update(id, &content).await?;
      println!("{}", format_item(&item));
    }
    Command::Annotate { id, text } => {
      let item = client.annotate(id, &text).await?;
      println!("{}", format_item(&item));
    }
    Command::Rm { ids } => match ids.as_slice() {
      [id] => client.delete(*id).await?,
      [] => bail!("no ids given"),
      many => client.delete_bulk(many).await?,
    },
    Command::Clear => client.clear().await?,
  }

  Ok(())
}

/// One line per item: `#N [id] created  content  (annotation)`.
fn format_item(item: &Item) -> String {
  let first_line = item.content.lines().next().unwrap_or_default();
  let more = if item.content.lines().nth(1).is_some() { " …" } else { "" };
  let mut line = format!(
    "#{:<3} [{}] {}  {first_line}{more}",
    item.sequence_number,
    item.id,
    item.created_at.format("%Y-%m-%d %H:%M"),
  );
  if let Some(note) = item.annotation.as_deref().filter(|a| !a.is_empty()) {
    line.push_str(&format!("  ({note})"));
  }
  line
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;

  fn item(content: &str, annotation: Option<&str>) -> Item {
    Item {
      id:              42,
      sequence_number: 3,
      content:         content.into(),
      annotation:      annotation.map(Into::into),
      created_at:      Utc.with_ymd_and_hms(2025, 4, 5, 6, 7, 8).unwrap(),
      updated_at:      None,
    }
  }

  #[test]
  fn format_single_line_item() {
    assert_eq!(
      format_item(&item("hello", None)),
      "#3   [42] 2025-04-05 06:07  hello"
    );
  }

  #[test]
  fn format_multiline_item_with_annotation() {
    let line = format_item(&item("first\nsecond", Some("note")));
    assert!(line.ends_with("first …  (note)"), "{line}");
  }

  #[test]
  fn args_parse_rm_with_many_ids() {
    let args = Args::try_parse_from(["clip", "rm", "1", "2", "3"]).unwrap();
    assert!(matches!(args.command, Command::Rm { ids } if ids == vec![1, 2, 3]));
  }

  #[test]
  fn args_reject_non_numeric_ids() {
    assert!(Args::try_parse_from(["clip", "rm", "abc"]).is_err());
  }
}
