use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::BookmarkSource;
use crate::{domain::Item, infrastructure::process::run_command};

const LIST_TIMEOUT: Duration = Duration::from_secs(20);
const READ_TIMEOUT: Duration = Duration::from_secs(20);
const REMOVE_TIMEOUT: Duration = Duration::from_secs(15);

static STATUS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"status/(\d+)").expect("valid status regex"));

pub struct BirdSource {
    bin: PathBuf,
}

impl BirdSource {
    pub fn new(bin: PathBuf) -> Self {
        Self { bin }
    }
}

#[async_trait]
impl BookmarkSource for BirdSource {
    async fn list_ids(&self, limit: usize) -> Result<Vec<String>> {
        let limit = limit.to_string();
        let output = run_command(&self.bin, &["bookmarks", "-n", limit.as_str()], LIST_TIMEOUT)
            .await
            .context("bird bookmarks failed")?;
        let ids = parse_bookmark_ids(&output.stdout);
        tracing::debug!(target: "source", count = ids.len(), "listed bookmarks");
        Ok(ids)
    }

    async fn fetch_item(&self, id: &str) -> Result<Item> {
        let output = run_command(&self.bin, &["read", id], READ_TIMEOUT)
            .await
            .context("bird read failed")?;
        let raw = output.stdout.trim();
        if raw.is_empty() {
            bail!("empty item output for {id}");
        }
        Ok(Item::new(id, raw))
    }

    async fn fetch_thread(&self, id: &str) -> Result<Option<String>> {
        let output = run_command(&self.bin, &["thread", id], READ_TIMEOUT).await?;
        let thread = output.stdout.trim();
        Ok((!thread.is_empty()).then(|| thread.to_string()))
    }

    async fn remove(&self, id: &str) -> Result<()> {
        run_command(&self.bin, &["unbookmark", id], REMOVE_TIMEOUT)
            .await
            .context("bird unbookmark failed")?;
        Ok(())
    }
}

/// Pulls status IDs out of `bird bookmarks` output, first occurrence wins.
pub fn parse_bookmark_ids(output: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for line in output.lines() {
        let Some(caps) = STATUS_REGEX.captures(line) else {
            continue;
        };
        let id = &caps[1];
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_from_listing() {
        let output = "\
@alice: new kiln https://x.com/alice/status/111
  nothing here
@bob https://x.com/bob/status/222?s=20
@alice again https://x.com/alice/status/111
";
        assert_eq!(parse_bookmark_ids(output), vec!["111", "222"]);
        assert!(parse_bookmark_ids("").is_empty());
    }
}
