use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::{
    ai::ClassifierModel,
    domain::{Catalog, ClassificationResult, Item},
};

mod json;
mod prompt;

pub use json::extract_first_json;
pub use prompt::build_prompt;

/// Headline or thread length at which linked content is no longer fetched.
pub const CONTEXT_SUFFICIENCY_THRESHOLD: usize = 200;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("no categories configured")]
    NoCategories,
}

#[derive(Debug, Deserialize)]
struct ModelAnswer {
    #[serde(default)]
    category: Option<String>,
    #[serde(default, rename = "needsUrlContent")]
    needs_url_content: bool,
}

pub struct Classifier {
    catalog: Arc<Catalog>,
    model: Option<Arc<dyn ClassifierModel>>,
}

impl Classifier {
    pub fn new(catalog: Arc<Catalog>, model: Option<Arc<dyn ClassifierModel>>) -> Self {
        Self { catalog, model }
    }

    pub async fn classify(&self, item: &Item) -> Result<ClassificationResult, ClassifyError> {
        if let Some((category, needs_url_content)) = self.consult_model(item).await {
            return Ok(ClassificationResult {
                category,
                allow_external_content_fetch: needs_url_content && !has_enough_context(item),
            });
        }

        let category = match keyword_match(&self.catalog, item) {
            Some(name) => name,
            None => self
                .catalog
                .default_category()
                .ok_or(ClassifyError::NoCategories)?,
        };

        Ok(ClassificationResult {
            category: category.to_string(),
            allow_external_content_fetch: false,
        })
    }

    async fn consult_model(&self, item: &Item) -> Option<(String, bool)> {
        let model = self.model.as_ref()?;
        let prompt = build_prompt(item, &self.catalog);

        let raw = match model.invoke(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(target: "classifier", id = %item.id, error = %err, "model call failed");
                return None;
            }
        };

        let answer = match parse_answer(&raw) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::debug!(target: "classifier", id = %item.id, error = %err, "unparseable model answer");
                return None;
            }
        };

        let suggested = answer.category.unwrap_or_default();
        match self.catalog.resolve_name(&suggested) {
            Some(name) => Some((name.to_string(), answer.needs_url_content)),
            None => {
                tracing::debug!(
                    target: "classifier",
                    id = %item.id,
                    suggested = %suggested,
                    "model answered with an unknown category"
                );
                None
            }
        }
    }
}

fn parse_answer(raw: &str) -> Result<ModelAnswer, serde_json::Error> {
    let json = extract_first_json(raw).unwrap_or_else(|| raw.trim());
    serde_json::from_str(json)
}

/// First keyword (case-insensitive substring) in category order wins.
pub fn keyword_match<'a>(catalog: &'a Catalog, item: &Item) -> Option<&'a str> {
    let haystack = item.combined_text().to_lowercase();
    catalog
        .categories()
        .find(|category| {
            category
                .keywords
                .iter()
                .filter(|kw| !kw.is_empty())
                .any(|kw| haystack.contains(&kw.to_lowercase()))
        })
        .map(|category| category.name.as_str())
}

pub fn has_enough_context(item: &Item) -> bool {
    item.headline().chars().count() >= CONTEXT_SUFFICIENCY_THRESHOLD
        || item.thread_text.trim().chars().count() >= CONTEXT_SUFFICIENCY_THRESHOLD
}
