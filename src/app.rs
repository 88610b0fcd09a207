use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use reqwest::Client;

use crate::{
    ai,
    classifier::Classifier,
    config::{load_catalog, AppConfig, ConfigError},
    domain::Catalog,
    infrastructure::{
        directories::ResolvedPaths, notifier::build_notifier, process::resolve_binary,
        quiet_hours::QuietHours, run_lock::RunLock,
    },
    router::{Router, RouterSettings},
    sources::BirdSource,
    store::{load_state, StateStore},
    summarizer::build_summarizer,
    tasks::{Pipeline, RunOptions},
    vault::FsVault,
};

pub struct BookmarkApp {
    config: AppConfig,
    paths: ResolvedPaths,
    catalog: Arc<Catalog>,
}

impl BookmarkApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths) -> Result<Self> {
        let catalog = Arc::new(load_catalog(&paths.config_file)?);
        tracing::debug!(
            target: "config",
            path = %paths.config_file.display(),
            categories = catalog.names().len(),
            "category config loaded"
        );
        Ok(Self {
            config,
            paths,
            catalog,
        })
    }

    pub fn status(&self) -> Result<()> {
        let state = load_state(&self.paths.state_file, self.catalog.names())?;
        let last = match state.last_processed.trim() {
            "" => "never",
            value => value,
        };
        println!("Processed: {} bookmarks", state.processed_ids().len());
        println!("Last processed: {last}");
        println!("Categories: {}", state.format_counts(self.catalog.names()));
        Ok(())
    }

    pub async fn process(&self, force: bool) -> Result<()> {
        let notifications = &self.config.notifications;
        let quiet_hours = QuietHours::parse(&notifications.quiet_start, &notifications.quiet_end)?;
        let timezone: Tz = self
            .config
            .timezone
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(self.config.timezone.clone()))?;
        let bird = resolve_binary(&self.config.source.bird_bin)
            .ok_or_else(|| anyhow!("bird binary not found: {}", self.config.source.bird_bin))?;

        let _lock = RunLock::acquire(&self.paths.state_file)?;
        let store = Arc::new(StateStore::load(&self.paths.state_file, self.catalog.names())?);
        let before = store.snapshot();
        println!("Processed so far: {} bookmarks", before.processed_ids().len());
        println!("Categories: {}", before.format_counts(self.catalog.names()));

        let http = Client::builder()
            .user_agent(format!("bookmark-router/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let source = Arc::new(BirdSource::new(bird));
        let classifier = Classifier::new(
            self.catalog.clone(),
            ai::build_model(&http, &self.config.classifier),
        );
        let router = Router::new(
            self.catalog.clone(),
            source.clone(),
            Arc::from(build_notifier(notifications)),
            build_summarizer(&http, &self.config.summarizer),
            Arc::new(FsVault),
            RouterSettings {
                vault_dir: self.paths.vault_dir.clone(),
                prompts_dir: self.paths.prompts_dir.clone(),
                quiet_hours,
                timezone,
            },
        );
        let pipeline = Arc::new(Pipeline::new(source, classifier, router, self.catalog.clone()));

        let options = RunOptions {
            force,
            limit: self.config.source.limit,
            parallel: self.config.pipeline.parallel,
            workers: self.config.pipeline.workers,
        };
        let processed = pipeline.run(&store, &options).await?;

        println!("Processed {processed} new bookmarks");
        println!(
            "Updated categories: {}",
            store.snapshot().format_counts(self.catalog.names())
        );
        Ok(())
    }
}
