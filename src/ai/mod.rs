use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::{config::ClassifierConfig, infrastructure::process::resolve_binary};

mod client;
pub mod inference;

pub use client::{ChatCompletionModel, CommandModel};

pub const CLASSIFY_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait]
pub trait ClassifierModel: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String>;
}

/// Prefers the CLI when it is on `PATH`, then the HTTP API when a key is set.
pub fn build_model(http: &Client, config: &ClassifierConfig) -> Option<Arc<dyn ClassifierModel>> {
    if let Some(bin) = resolve_binary(&config.command) {
        tracing::info!(target: "classifier", bin = %bin.display(), "using classifier CLI");
        return Some(Arc::new(CommandModel::new(bin)));
    }
    if config.api_key.is_some() {
        tracing::info!(target: "classifier", model = %config.model, "using chat-completions classifier");
        return Some(Arc::new(ChatCompletionModel::new(http.clone(), config.clone())));
    }
    tracing::info!(target: "classifier", "no external classifier available; keyword matching only");
    None
}
