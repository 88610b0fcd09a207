use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDefinition {
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Notify,
    SaveToVault,
    GenerateTask,
    RazorTask,
    Unbookmark,
    Summarize,
    /// Unrecognised action string, kept for the warning; behaves as `Notify`.
    Unknown(String),
}

impl ActionKind {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "notify" => ActionKind::Notify,
            "save_to_vault" | "save_obsidian" => ActionKind::SaveToVault,
            "generate_task" | "codex_prompt" => ActionKind::GenerateTask,
            "razor_task" => ActionKind::RazorTask,
            "unbookmark" => ActionKind::Unbookmark,
            "summarize" => ActionKind::Summarize,
            _ => ActionKind::Unknown(trimmed.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub category: String,
    pub action: ActionKind,
    pub target_path: Option<String>,
    pub notify_on_complete: bool,
}

impl RouteDefinition {
    pub fn fallback(category: &str) -> Self {
        Self {
            category: category.to_string(),
            action: ActionKind::Notify,
            target_path: None,
            notify_on_complete: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub category: String,
    pub allow_external_content_fetch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebContent {
    pub title: Option<String>,
    pub site_name: Option<String>,
    pub content: Option<String>,
}

impl WebContent {
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str("Title: ");
            out.push_str(title);
            out.push('\n');
        }
        if let Some(site) = &self.site_name {
            out.push_str("Site: ");
            out.push_str(site);
            out.push('\n');
        }
        if let Some(text) = &self.content {
            out.push_str(text);
        }
        out.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_accepts_aliases_and_case() {
        assert_eq!(ActionKind::parse(" Save_Obsidian "), ActionKind::SaveToVault);
        assert_eq!(ActionKind::parse("codex_prompt"), ActionKind::GenerateTask);
        assert_eq!(ActionKind::parse("Razor_Task"), ActionKind::RazorTask);
        assert_eq!(ActionKind::parse(""), ActionKind::Notify);
        assert_eq!(
            ActionKind::parse("teleport"),
            ActionKind::Unknown("teleport".to_string())
        );
    }
}
