use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::SummarizerConfig,
    infrastructure::process::{resolve_binary, run_command},
};

mod web;

pub use web::WebSummarizer;

const SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns a URL into a short text. `Ok(None)` means nothing usable came back.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, url: &str) -> Result<Option<String>>;
}

pub struct CommandSummarizer {
    bin: PathBuf,
}

impl CommandSummarizer {
    pub fn new(bin: PathBuf) -> Self {
        Self { bin }
    }
}

#[async_trait]
impl Summarizer for CommandSummarizer {
    async fn summarize(&self, url: &str) -> Result<Option<String>> {
        let output = run_command(&self.bin, &[url], SUMMARIZE_TIMEOUT).await?;
        let summary = output.stdout.trim();
        Ok((!summary.is_empty()).then(|| summary.to_string()))
    }
}

pub fn build_summarizer(http: &Client, config: &SummarizerConfig) -> Arc<dyn Summarizer> {
    match resolve_binary(&config.command) {
        Some(bin) => {
            tracing::info!(target: "summarize", bin = %bin.display(), "using summarize CLI");
            Arc::new(CommandSummarizer::new(bin))
        }
        None => {
            tracing::info!(target: "summarize", "summarize CLI not found; using built-in web reader");
            Arc::new(WebSummarizer::new(http.clone(), config.clone()))
        }
    }
}
