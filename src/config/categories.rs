use std::{collections::HashMap, fmt, fs, path::Path};

use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer,
};

use super::env::ConfigError;
use crate::domain::{ActionKind, Catalog, CategoryDefinition, RouteDefinition};

pub const DEFAULT_CONFIG_YAML: &str = r#"categories:
  tools:
    description: "AI agents, automation, CLI tools, developer workflows"
    keywords: [agent, automation, "cli tool", terminal, workflow, skill, "claude code", cursor]
  coding:
    description: "Vibe coding, AI-assisted development, code generation"
    keywords: ["vibe coding", codex, "ai-assisted", "ai development", "code generation", "llm coding", "prompt engineering"]
  readLater:
    description: "Articles, videos, long-form content"
    keywords: [article, blog, "http://", "https://", "youtube.com", "youtu.be", "spotify.com", podcast]
  other:
    description: "Unclear or uncategorized"
    keywords: []

routing:
  tools:
    action: save_to_vault
    path: "Bookmarks/Tools"
    notify: true
  coding:
    action: generate_task
    path: "Bookmarks/Coding"
    notify: true
  readLater:
    action: summarize
    notify: true
  other:
    action: notify
    notify: true
"#;

#[derive(Debug, Default, Deserialize)]
struct CategoriesFile {
    #[serde(default)]
    categories: OrderedCategories,
    #[serde(default)]
    routing: Option<HashMap<String, RouteEntry>>,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryEntry {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RouteEntry {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    notify: bool,
}

#[derive(Debug, Default)]
struct OrderedCategories(Vec<(String, CategoryEntry)>);

impl<'de> Deserialize<'de> for OrderedCategories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = OrderedCategories;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("categories must be a mapping")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderedCategories::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, CategoryEntry)> = Vec::new();
                while let Some((key, value)) =
                    map.next_entry::<String, Option<CategoryEntry>>()?
                {
                    let key = key.trim().to_string();
                    if key.is_empty() {
                        continue;
                    }
                    let value = value.unwrap_or_default();
                    match entries.iter_mut().find(|(name, _)| *name == key) {
                        Some(slot) => slot.1 = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(OrderedCategories(entries))
            }
        }

        deserializer.deserialize_any(OrderedVisitor)
    }
}

/// Writes the built-in config to `path` if nothing is there yet, then loads it.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    ensure_default_config(path)?;
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&raw)
}

pub fn parse_catalog(raw: &str) -> Result<Catalog, ConfigError> {
    let file: CategoriesFile = if raw.trim().is_empty() {
        CategoriesFile::default()
    } else {
        serde_yaml::from_str(raw)?
    };

    let categories: Vec<CategoryDefinition> = file
        .categories
        .0
        .into_iter()
        .map(|(name, entry)| CategoryDefinition {
            name,
            description: entry.description.unwrap_or_default().trim().to_string(),
            keywords: entry
                .keywords
                .unwrap_or_default()
                .into_iter()
                .filter(|kw| !kw.is_empty())
                .collect(),
        })
        .collect();

    if categories.is_empty() {
        return Err(ConfigError::NoCategories);
    }

    let routes = file
        .routing
        .unwrap_or_default()
        .into_iter()
        .map(|(category, entry)| (category.trim().to_string(), entry))
        .filter(|(category, _)| !category.is_empty())
        .map(|(category, entry)| RouteDefinition {
            action: ActionKind::parse(entry.action.as_deref().unwrap_or_default()),
            target_path: entry
                .path
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            notify_on_complete: entry.notify,
            category,
        })
        .collect();

    Ok(Catalog::new(categories, routes))
}

fn ensure_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, DEFAULT_CONFIG_YAML).map_err(io_err)?;
    tracing::info!(target: "config", path = %path.display(), "wrote default category config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const POTTERY_CONFIG: &str = r#"categories:
  razor:
    description: "AI agents"
    keywords: [agent]
  pottery:
    description: "Ceramics, pottery business, kiln, glazes"
    keywords: [ceramic, pottery, kiln, glaze, clay]

routing:
  razor:
    action: notify
    notify: false
  pottery:
    action: save_obsidian
    path: "Pottery/Twitter-Bookmarks"
    notify: false
"#;

    #[test]
    fn parses_categories_in_declaration_order() {
        let catalog = parse_catalog(POTTERY_CONFIG).unwrap();
        assert_eq!(catalog.names(), &["razor".to_string(), "pottery".to_string()]);

        let pottery = catalog.get("pottery").unwrap();
        assert_eq!(pottery.keywords[2], "kiln");

        let route = catalog.route("pottery").unwrap();
        assert_eq!(route.action, ActionKind::SaveToVault);
        assert_eq!(route.target_path.as_deref(), Some("Pottery/Twitter-Bookmarks"));
        assert!(!route.notify_on_complete);
    }

    #[test]
    fn order_is_not_alphabetical() {
        let raw = "categories:\n  zeta:\n    keywords: [z]\n  alpha:\n    keywords: [a]\n  mid: {}\n";
        let catalog = parse_catalog(raw).unwrap();
        assert_eq!(
            catalog.names(),
            &["zeta".to_string(), "alpha".to_string(), "mid".to_string()]
        );
        assert!(catalog.route("zeta").is_none());
    }

    #[test]
    fn routing_keys_are_trimmed_like_category_keys() {
        let raw = "categories:\n  pottery:\n    keywords: [kiln]\nrouting:\n  \" pottery \":\n    action: unbookmark\n";
        let catalog = parse_catalog(raw).unwrap();
        let route = catalog.route("pottery").unwrap();
        assert_eq!(route.category, "pottery");
        assert_eq!(route.action, ActionKind::Unbookmark);
    }

    #[test]
    fn empty_categories_are_rejected() {
        assert!(matches!(parse_catalog(""), Err(ConfigError::NoCategories)));
        assert!(matches!(
            parse_catalog("categories: {}\nrouting: {}\n"),
            Err(ConfigError::NoCategories)
        ));
        assert!(matches!(
            parse_catalog("categories: [a, b]\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn missing_file_gets_default_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let catalog = load_catalog(&path).unwrap();
        assert!(path.exists());
        assert_eq!(catalog.names().len(), 4);
        assert_eq!(catalog.default_category(), Some("other"));
        assert_eq!(
            catalog.route("coding").map(|r| r.action.clone()),
            Some(ActionKind::GenerateTask)
        );
    }
}
