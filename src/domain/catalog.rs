use std::collections::HashMap;

use super::types::{CategoryDefinition, RouteDefinition};

/// Ordered category definitions plus the routing table.
///
/// Category order is both display order and keyword priority; the map is
/// only there for lookups. Read-only once built, shared across workers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    order: Vec<String>,
    categories: HashMap<String, CategoryDefinition>,
    routes: HashMap<String, RouteDefinition>,
}

impl Catalog {
    pub fn new(categories: Vec<CategoryDefinition>, routes: Vec<RouteDefinition>) -> Self {
        let mut catalog = Catalog::default();
        for category in categories {
            if !catalog.categories.contains_key(&category.name) {
                catalog.order.push(category.name.clone());
            }
            catalog.categories.insert(category.name.clone(), category);
        }
        for route in routes {
            catalog.routes.insert(route.category.clone(), route);
        }
        catalog
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.categories.get(name))
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&CategoryDefinition> {
        self.categories.get(name)
    }

    pub fn route(&self, category: &str) -> Option<&RouteDefinition> {
        self.routes.get(category)
    }

    /// Matches `value` against category names: case-insensitive first, then
    /// with spaces, underscores and hyphens stripped.
    pub fn resolve_name(&self, value: &str) -> Option<&str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lower = trimmed.to_lowercase();
        if let Some(name) = self.order.iter().find(|name| name.to_lowercase() == lower) {
            return Some(name);
        }
        self.find_normalized(trimmed)
    }

    pub fn find_normalized(&self, target: &str) -> Option<&str> {
        let wanted = normalize_key(target);
        if wanted.is_empty() {
            return None;
        }
        self.order
            .iter()
            .find(|name| normalize_key(name) == wanted)
            .map(String::as_str)
    }

    /// Category used when nothing else matched: `other` if defined, else the first.
    pub fn default_category(&self) -> Option<&str> {
        self.find_normalized("other")
            .or_else(|| self.order.first().map(String::as_str))
    }

    pub fn is_default_category(&self, category: &str) -> bool {
        self.find_normalized("other") == Some(category)
    }
}

pub fn normalize_key(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> CategoryDefinition {
        CategoryDefinition {
            name: name.to_string(),
            description: String::new(),
            keywords: Vec::new(),
        }
    }

    #[test]
    fn resolve_name_normalizes_model_answers() {
        let catalog = Catalog::new(vec![category("tools"), category("pottery")], Vec::new());
        for answer in ["Pottery", "pottery ", "POTTERY", "pot-tery", "pot_tery", "Pot Tery"] {
            assert_eq!(catalog.resolve_name(answer), Some("pottery"), "{answer}");
        }
        assert_eq!(catalog.resolve_name("ceramics"), None);
        assert_eq!(catalog.resolve_name("  "), None);
    }

    #[test]
    fn default_category_prefers_other() {
        let catalog = Catalog::new(
            vec![category("tools"), category("Other"), category("news")],
            Vec::new(),
        );
        assert_eq!(catalog.default_category(), Some("Other"));
        assert!(catalog.is_default_category("Other"));

        let catalog = Catalog::new(vec![category("tools"), category("news")], Vec::new());
        assert_eq!(catalog.default_category(), Some("tools"));
        assert!(!catalog.is_default_category("tools"));

        assert_eq!(Catalog::default().default_category(), None);
    }

    #[test]
    fn duplicate_names_keep_first_position() {
        let catalog = Catalog::new(
            vec![category("a"), category("b"), category("a")],
            Vec::new(),
        );
        assert_eq!(catalog.names(), &["a".to_string(), "b".to_string()]);
    }
}
