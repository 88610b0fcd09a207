use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct State {
    #[serde(rename = "lastProcessed", default, deserialize_with = "null_as_default")]
    pub last_processed: String,
    #[serde(rename = "processedIds", default, deserialize_with = "null_as_default")]
    processed_ids: Vec<String>,
    #[serde(rename = "categories", default, deserialize_with = "null_as_default")]
    category_counts: BTreeMap<String, u64>,
    #[serde(skip)]
    index: HashSet<String>,
}

impl State {
    pub fn fresh(categories: &[String]) -> Self {
        let mut state = State::default();
        state.ensure_categories(categories);
        state
    }

    pub fn ensure_categories(&mut self, categories: &[String]) {
        for name in categories {
            self.category_counts.entry(name.clone()).or_insert(0);
        }
    }

    /// Drops duplicate IDs (first occurrence kept) and rebuilds the lookup set.
    pub(crate) fn reindex(&mut self) {
        let mut seen = HashSet::with_capacity(self.processed_ids.len());
        self.processed_ids.retain(|id| seen.insert(id.clone()));
        self.index = seen;
    }

    /// Records a processed item. Returns `false` if the ID was already in
    /// the ledger; the category counter is incremented either way.
    pub fn mark_processed(&mut self, id: &str, category: &str) -> bool {
        let inserted = self.index.insert(id.to_string());
        if inserted {
            self.processed_ids.push(id.to_string());
        }
        *self.category_counts.entry(category.to_string()).or_insert(0) += 1;
        inserted
    }

    #[cfg(test)]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn processed_ids(&self) -> &[String] {
        &self.processed_ids
    }

    pub fn processed_set(&self) -> HashSet<String> {
        self.index.clone()
    }

    pub fn count(&self, category: &str) -> u64 {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    #[cfg(test)]
    pub fn category_counts(&self) -> &BTreeMap<String, u64> {
        &self.category_counts
    }

    pub fn format_counts(&self, order: &[String]) -> String {
        order
            .iter()
            .map(|name| format!("{}={}", name, self.count(name)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn mark_processed_is_idempotent_for_ids() {
        let mut state = State::fresh(&names(&["pottery"]));
        assert!(state.mark_processed("1", "pottery"));
        assert!(!state.mark_processed("1", "pottery"));
        assert_eq!(state.processed_ids(), &["1".to_string()]);
        assert_eq!(state.count("pottery"), 2);
    }

    #[test]
    fn unknown_categories_get_counters_on_demand() {
        let mut state = State::fresh(&[]);
        state.mark_processed("1", "surprise");
        assert_eq!(state.count("surprise"), 1);
    }

    #[test]
    fn format_counts_follows_given_order() {
        let mut state = State::fresh(&names(&["b", "a"]));
        state.mark_processed("1", "a");
        assert_eq!(state.format_counts(&names(&["b", "a"])), "b=0 a=1");
    }

    #[test]
    fn serializes_with_ledger_field_names() {
        let mut state = State::fresh(&names(&["x"]));
        state.mark_processed("9", "x");
        state.last_processed = "2026-10-19T00:00:00Z".into();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["lastProcessed"], "2026-10-19T00:00:00Z");
        assert_eq!(json["processedIds"][0], "9");
        assert_eq!(json["categories"]["x"], 1);
        assert!(json.get("index").is_none());
    }
}
