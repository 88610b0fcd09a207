use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::{config::ClassifierConfig, infrastructure::process::run_command};

use super::{
    inference::{build_request, parse_response},
    ClassifierModel, CLASSIFY_TIMEOUT,
};

#[derive(Clone)]
pub struct ChatCompletionModel {
    http: Client,
    config: ClassifierConfig,
}

impl ChatCompletionModel {
    pub fn new(http: Client, config: ClassifierConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl ClassifierModel for ChatCompletionModel {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .context("CLASSIFIER_API_KEY must be configured for the HTTP classifier")?;

        let request = build_request(self.config.model.clone(), prompt);
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .timeout(CLASSIFY_TIMEOUT)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        parse_response(response).await
    }
}

pub struct CommandModel {
    bin: PathBuf,
    timeout: Duration,
}

impl CommandModel {
    pub fn new(bin: PathBuf) -> Self {
        Self {
            bin,
            timeout: CLASSIFY_TIMEOUT,
        }
    }
}

#[async_trait]
impl ClassifierModel for CommandModel {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        let output = run_command(&self.bin, &[prompt], self.timeout).await?;
        let raw = output.stdout.trim();
        if raw.is_empty() {
            bail!("empty classifier response");
        }
        Ok(raw.to_string())
    }
}
