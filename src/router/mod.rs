use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    domain::{ActionKind, Catalog, Item, RouteDefinition},
    infrastructure::{notifier::Notifier, quiet_hours::QuietHours},
    sources::BookmarkSource,
    summarizer::Summarizer,
    vault::VaultWriter,
};

pub mod messages;
pub mod notes;

use notes::LinkedContent;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub const TASK_NOTE_LABEL: &str = "task";
pub const RAZOR_NOTE_LABEL: &str = "razor";

#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub vault_dir: PathBuf,
    pub prompts_dir: PathBuf,
    pub quiet_hours: QuietHours,
    pub timezone: Tz,
}

pub struct Router {
    catalog: Arc<Catalog>,
    source: Arc<dyn BookmarkSource>,
    notifier: Arc<dyn Notifier>,
    summarizer: Arc<dyn Summarizer>,
    vault: Arc<dyn VaultWriter>,
    settings: RouterSettings,
    clock: Clock,
}

impl Router {
    pub fn new(
        catalog: Arc<Catalog>,
        source: Arc<dyn BookmarkSource>,
        notifier: Arc<dyn Notifier>,
        summarizer: Arc<dyn Summarizer>,
        vault: Arc<dyn VaultWriter>,
        settings: RouterSettings,
    ) -> Self {
        Self {
            catalog,
            source,
            notifier,
            summarizer,
            vault,
            settings,
            clock: Arc::new(Utc::now),
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Only vault/prompt writes and bookmark removal fail the route;
    /// notification and summarization problems are logged and dropped.
    pub async fn route(
        &self,
        item: &Item,
        category: &str,
        route: &RouteDefinition,
        urls: &[String],
        allow_external_content_fetch: bool,
    ) -> Result<()> {
        match &route.action {
            ActionKind::Notify => {
                if route.notify_on_complete {
                    let is_default = self.catalog.is_default_category(category);
                    self.notify(&messages::notify_message(category, item, is_default))
                        .await;
                }
            }
            ActionKind::Summarize => {
                if route.notify_on_complete {
                    let summaries = self
                        .collect_summaries(urls, allow_external_content_fetch, messages::MAX_NOTIFY_SUMMARIES)
                        .await;
                    self.notify(&messages::summary_message(category, item, &summaries))
                        .await;
                }
            }
            ActionKind::SaveToVault => {
                let linked = self.linked_content(urls, allow_external_content_fetch).await;
                self.save_note(item, category, route, &linked).await?;
                if route.notify_on_complete {
                    self.notify(&messages::saved_message(category, item)).await;
                }
            }
            ActionKind::GenerateTask => {
                let linked = self.linked_content(urls, allow_external_content_fetch).await;
                self.save_note(item, TASK_NOTE_LABEL, route, &linked).await?;

                let prompt = notes::render_task_prompt(item, &linked);
                let prompt_path = self.settings.prompts_dir.join(format!("{}.txt", item.id));
                self.vault.write(&prompt_path, &prompt).await?;
                tracing::info!(target: "router", id = %item.id, path = %prompt_path.display(), "task prompt written");

                if route.notify_on_complete {
                    let path = prompt_path.display().to_string();
                    self.notify(&messages::task_message(&path, &prompt)).await;
                }
            }
            ActionKind::RazorTask => {
                let linked = self.linked_content(urls, allow_external_content_fetch).await;
                if let Err(err) = self.save_note(item, RAZOR_NOTE_LABEL, route, &linked).await {
                    let error = format!("{err:#}");
                    tracing::warn!(target: "router", id = %item.id, error = %error, "failed to save razor note");
                }
                if route.notify_on_complete {
                    self.notify(&messages::razor_message(item)).await;
                }
            }
            ActionKind::Unbookmark => {
                self.source.remove(&item.id).await?;
                tracing::info!(target: "router", id = %item.id, category, "bookmark removed");
                if route.notify_on_complete {
                    self.notify(&messages::removed_message(category, item)).await;
                }
            }
            ActionKind::Unknown(action) => {
                tracing::warn!(
                    target: "router",
                    action = %action,
                    category,
                    "unknown routing action; defaulting to notify"
                );
                if route.notify_on_complete {
                    let is_default = self.catalog.is_default_category(category);
                    self.notify(&messages::notify_message(category, item, is_default))
                        .await;
                }
            }
        }
        Ok(())
    }

    async fn save_note(
        &self,
        item: &Item,
        label: &str,
        route: &RouteDefinition,
        linked: &LinkedContent,
    ) -> Result<PathBuf> {
        let folder = self.resolve_vault_folder(route.target_path.as_deref(), &route.category)?;
        let now = (self.clock)().with_timezone(&self.settings.timezone);
        let date = now.format("%Y-%m-%d").to_string();
        let path = folder.join(notes::note_filename(&date, &item.id));

        let content = notes::render_note(item, label, &now.to_rfc3339(), linked);
        self.vault.write(&path, &content).await?;
        tracing::info!(target: "router", id = %item.id, path = %path.display(), "note saved");
        Ok(path)
    }

    fn resolve_vault_folder(&self, target: Option<&str>, category: &str) -> Result<PathBuf> {
        let target = target
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow!("route for category {category:?} has no vault path"))?;
        let path = Path::new(target);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.settings.vault_dir.join(path))
        }
    }

    async fn linked_content(&self, urls: &[String], fetch_allowed: bool) -> LinkedContent {
        LinkedContent {
            summaries: self.collect_summaries(urls, fetch_allowed, usize::MAX).await,
            fetch_allowed,
            url_count: urls.len(),
        }
    }

    async fn collect_summaries(
        &self,
        urls: &[String],
        fetch_allowed: bool,
        limit: usize,
    ) -> Vec<(String, String)> {
        let mut summaries = Vec::new();
        if !fetch_allowed {
            return summaries;
        }
        for url in urls {
            if summaries.len() >= limit {
                break;
            }
            match self.summarizer.summarize(url).await {
                Ok(Some(summary)) => summaries.push((url.clone(), summary)),
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(target: "summarize", url = %url, error = %err, "summary failed");
                }
            }
        }
        summaries
    }

    async fn notify(&self, message: &str) {
        let now = (self.clock)().with_timezone(&self.settings.timezone);
        if self.settings.quiet_hours.contains(&now) {
            tracing::info!(target: "notify", "quiet hours active; skipping notification");
            return;
        }
        if let Err(err) = self.notifier.send(message).await {
            tracing::warn!(target: "notify", error = %err, "failed to send notification");
        }
    }
}
