//! In-memory collaborators for unit tests.

use std::collections::{HashMap, HashSet};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    ai::ClassifierModel, domain::Item, infrastructure::notifier::Notifier,
    sources::BookmarkSource, summarizer::Summarizer,
};

pub struct FakeModel {
    answer: Option<String>,
}

impl FakeModel {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { answer: None }
    }
}

#[async_trait]
impl ClassifierModel for FakeModel {
    async fn invoke(&self, _prompt: &str) -> Result<String> {
        self.answer
            .clone()
            .ok_or_else(|| anyhow!("classifier timed out"))
    }
}

#[derive(Default)]
pub struct FakeSource {
    ids: Vec<String>,
    items: HashMap<String, (String, String)>,
    failing_fetch: HashSet<String>,
    yield_on_fetch: bool,
    fail_listing: Mutex<bool>,
    fail_removals: Mutex<bool>,
    removed: Mutex<Vec<String>>,
    fetches: Mutex<usize>,
}

impl FakeSource {
    pub fn with_item(mut self, id: &str, text: &str, thread: &str) -> Self {
        self.ids.push(id.to_string());
        self.items
            .insert(id.to_string(), (text.to_string(), thread.to_string()));
        self
    }

    pub fn with_failing_fetch(mut self, id: &str) -> Self {
        self.ids.push(id.to_string());
        self.failing_fetch.insert(id.to_string());
        self
    }

    /// Yields to the scheduler inside each fetch so parallel workers interleave.
    pub fn with_yield(mut self) -> Self {
        self.yield_on_fetch = true;
        self
    }

    pub fn fail_listing(&self) {
        *self.fail_listing.lock() = true;
    }

    pub fn fail_removals(&self) {
        *self.fail_removals.lock() = true;
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().clone()
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock()
    }
}

#[async_trait]
impl BookmarkSource for FakeSource {
    async fn list_ids(&self, limit: usize) -> Result<Vec<String>> {
        if *self.fail_listing.lock() {
            bail!("bookmark listing failed");
        }
        Ok(self.ids.iter().take(limit).cloned().collect())
    }

    async fn fetch_item(&self, id: &str) -> Result<Item> {
        *self.fetches.lock() += 1;
        if self.yield_on_fetch {
            tokio::task::yield_now().await;
        }
        if self.failing_fetch.contains(id) {
            bail!("read failed for {id}");
        }
        let (text, _) = self
            .items
            .get(id)
            .ok_or_else(|| anyhow!("unknown item {id}"))?;
        Ok(Item::new(id, text.clone()))
    }

    async fn fetch_thread(&self, id: &str) -> Result<Option<String>> {
        match self.items.get(id) {
            Some((_, thread)) if !thread.is_empty() => Ok(Some(thread.clone())),
            Some(_) => Ok(None),
            None => bail!("no thread for {id}"),
        }
    }

    async fn remove(&self, id: &str) -> Result<()> {
        if *self.fail_removals.lock() {
            bail!("unbookmark failed for {id}");
        }
        self.removed.lock().push(id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    sent: Mutex<Vec<String>>,
    failing: Mutex<bool>,
}

impl FakeNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn fail_sends(&self) {
        *self.failing.lock() = true;
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        if *self.failing.lock() {
            bail!("notification transport down");
        }
        self.sent.lock().push(message.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSummarizer {
    summaries: Mutex<HashMap<String, String>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<usize>,
}

impl FakeSummarizer {
    pub fn set(&self, url: &str, summary: &str) {
        self.summaries
            .lock()
            .insert(url.to_string(), summary.to_string());
    }

    pub fn fail_for(&self, url: &str) {
        self.failing.lock().insert(url.to_string());
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, url: &str) -> Result<Option<String>> {
        *self.calls.lock() += 1;
        if self.failing.lock().contains(url) {
            bail!("summarize timed out for {url}");
        }
        Ok(self.summaries.lock().get(url).cloned())
    }
}
