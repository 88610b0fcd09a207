use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use anyhow::{bail, Result};
use chrono::{SecondsFormat, Utc};
use futures::future::join_all;

use crate::{
    classifier::Classifier,
    domain::{Catalog, RouteDefinition},
    router::Router,
    sources::BookmarkSource,
    store::StateStore,
    tasks::queue::WorkQueue,
};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub force: bool,
    pub limit: usize,
    pub parallel: bool,
    pub workers: usize,
}

pub struct Pipeline {
    source: Arc<dyn BookmarkSource>,
    classifier: Classifier,
    router: Router,
    catalog: Arc<Catalog>,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn BookmarkSource>,
        classifier: Classifier,
        router: Router,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            source,
            classifier,
            router,
            catalog,
        }
    }

    /// Returns how many items were processed. State is written once, at the
    /// end, and only if that number is non-zero.
    pub async fn run(self: &Arc<Self>, store: &Arc<StateStore>, options: &RunOptions) -> Result<usize> {
        if self.catalog.is_empty() {
            bail!("no categories configured");
        }

        let ids = self.source.list_ids(options.limit).await?;
        let pending = pending_ids(ids, &store.processed_set(), options.force);
        tracing::info!(
            target: "pipeline",
            pending = pending.len(),
            force = options.force,
            parallel = options.parallel,
            "starting run"
        );

        let processed = if options.parallel {
            self.process_parallel(pending, store, options.workers).await
        } else {
            self.process_sequential(pending, store).await
        };

        if processed > 0 {
            store.stamp(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
            store.save()?;
        }
        tracing::info!(target: "pipeline", processed, "run finished");
        Ok(processed)
    }

    async fn process_sequential(&self, pending: Vec<String>, store: &StateStore) -> usize {
        let mut processed = 0;
        for id in pending {
            if self.process_and_record(&id, store).await {
                processed += 1;
            }
        }
        processed
    }

    async fn process_parallel(
        self: &Arc<Self>,
        pending: Vec<String>,
        store: &Arc<StateStore>,
        workers: usize,
    ) -> usize {
        if pending.is_empty() {
            return 0;
        }
        let workers = workers.clamp(1, pending.len());
        let queue: Arc<WorkQueue<String>> = Arc::new(pending.into_iter().collect());
        let processed = Arc::new(AtomicUsize::new(0));

        let handles = (0..workers).map(|worker| {
            let pipeline = Arc::clone(self);
            let store = Arc::clone(store);
            let queue = Arc::clone(&queue);
            let processed = Arc::clone(&processed);
            tokio::spawn(async move {
                while let Some(id) = queue.pop() {
                    if pipeline.process_and_record(&id, &store).await {
                        processed.fetch_add(1, Ordering::Relaxed);
                    }
                }
                tracing::debug!(target: "pipeline", worker, "worker drained queue");
            })
        });

        for result in join_all(handles).await {
            if let Err(err) = result {
                tracing::error!(target: "pipeline", error = %err, "pipeline worker aborted");
            }
        }
        processed.load(Ordering::Relaxed)
    }

    async fn process_and_record(&self, id: &str, store: &StateStore) -> bool {
        match self.process_item(id).await {
            Ok(category) => {
                store.mark_processed(id, &category);
                tracing::info!(target: "pipeline", id, category = %category, "bookmark processed");
                true
            }
            Err(err) => {
                let error = format!("{err:#}");
                tracing::error!(target: "pipeline", id, error = %error, "failed to process bookmark");
                false
            }
        }
    }

    async fn process_item(&self, id: &str) -> Result<String> {
        let mut item = self.source.fetch_item(id).await?;
        match self.source.fetch_thread(id).await {
            Ok(Some(thread)) => item.thread_text = thread,
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(target: "source", id, error = %err, "thread unavailable");
            }
        }

        let classification = self.classifier.classify(&item).await?;
        let category = classification.category;
        let urls = item.urls();

        let route = match self.catalog.route(&category) {
            Some(route) => route.clone(),
            None => {
                tracing::warn!(
                    target: "pipeline",
                    category = %category,
                    "no routing configured; defaulting to notify"
                );
                RouteDefinition::fallback(&category)
            }
        };

        self.router
            .route(
                &item,
                &category,
                &route,
                &urls,
                classification.allow_external_content_fetch,
            )
            .await?;
        Ok(category)
    }
}

pub fn pending_ids(ids: Vec<String>, processed: &HashSet<String>, force: bool) -> Vec<String> {
    if force {
        return ids;
    }
    ids.into_iter().filter(|id| !processed.contains(id)).collect()
}
