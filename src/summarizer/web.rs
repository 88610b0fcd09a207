use anyhow::{Context, Result};
use async_trait::async_trait;
use dom_smoothie::{Config as ReadabilityConfig, Readability, TextMode};
use reqwest::Client;
use tracing::warn;
use url::Url;

use super::Summarizer;
use crate::{config::SummarizerConfig, domain::WebContent};

pub struct WebSummarizer {
    client: Client,
    config: SummarizerConfig,
}

impl WebSummarizer {
    pub fn new(client: Client, config: SummarizerConfig) -> Self {
        Self { client, config }
    }

    pub async fn fetch(&self, raw_url: &str) -> Result<Option<WebContent>> {
        let url = match Url::parse(raw_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            _ => return Ok(None),
        };

        let response = self
            .client
            .get(url.clone())
            .timeout(self.config.fetch_timeout)
            .send()
            .await
            .with_context(|| format!("failed to fetch {}", url))?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(extract_readable(&body, &url, self.config.content_max_length))
    }
}

#[async_trait]
impl Summarizer for WebSummarizer {
    async fn summarize(&self, url: &str) -> Result<Option<String>> {
        let content = self.fetch(url).await?;
        Ok(content
            .map(|content| content.render())
            .filter(|text| !text.is_empty()))
    }
}

fn extract_readable(body: &str, url: &Url, max_length: usize) -> Option<WebContent> {
    let smoothie_cfg = ReadabilityConfig {
        text_mode: TextMode::Formatted,
        ..Default::default()
    };

    let mut readability = match Readability::new(body, Some(url.as_str()), Some(smoothie_cfg)) {
        Ok(reader) => reader,
        Err(err) => {
            warn!(target: "summarize", error = %err, url = %url, "Readability init failed");
            return None;
        }
    };

    let article = match readability.parse() {
        Ok(article) => article,
        Err(err) => {
            warn!(target: "summarize", error = %err, url = %url, "Readability parse failed");
            return None;
        }
    };

    let title = clean_str(Some(article.title));
    let site_name = clean_str(article.site_name);
    let text = truncate_chars(article.text_content.to_string().trim(), max_length);

    Some(WebContent {
        title,
        site_name,
        content: if text.is_empty() { None } else { Some(text) },
    })
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn clean_str(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn clean_str_drops_blank_values() {
        assert_eq!(clean_str(Some("  ".into())), None);
        assert_eq!(clean_str(Some(" Kiln Weekly ".into())), Some("Kiln Weekly".into()));
        assert_eq!(clean_str(None), None);
    }
}
