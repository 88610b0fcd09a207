use std::{
    collections::HashSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use parking_lot::Mutex;

mod state;

pub use state::State;

/// Reads the ledger at `path`, or starts a fresh one if the file is missing.
pub fn load_state(path: &Path, categories: &[String]) -> Result<State> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(target: "state", path = %path.display(), "no prior state; starting fresh");
            return Ok(State::fresh(categories));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read state {}", path.display()))
        }
    };

    let mut state: State = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse state {}", path.display()))?;
    state.reindex();
    state.ensure_categories(categories);
    Ok(state)
}

pub fn save_state(path: &Path, state: &State) -> Result<()> {
    let data = serde_json::to_string_pretty(state)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, data).with_context(|| format!("failed to write state {}", path.display()))
}

/// The run's one shared mutable resource. Workers record results through
/// `mark_processed`; the file is only written by `save`.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    state: Mutex<State>,
}

impl StateStore {
    pub fn load(path: &Path, categories: &[String]) -> Result<Self> {
        let state = load_state(path, categories)?;
        Ok(Self::with_state(path, state))
    }

    pub fn with_state(path: &Path, state: State) -> Self {
        Self {
            path: path.to_path_buf(),
            state: Mutex::new(state),
        }
    }

    pub fn mark_processed(&self, id: &str, category: &str) -> bool {
        self.state.lock().mark_processed(id, category)
    }

    pub fn processed_set(&self) -> HashSet<String> {
        self.state.lock().processed_set()
    }

    pub fn snapshot(&self) -> State {
        self.state.lock().clone()
    }

    pub fn stamp(&self, timestamp: String) {
        self.state.lock().last_processed = timestamp;
    }

    pub fn save(&self) -> Result<()> {
        let state = self.snapshot();
        save_state(&self.path, &state)?;
        tracing::debug!(
            target: "state",
            path = %self.path.display(),
            processed = state.processed_ids().len(),
            "state saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_file_yields_fresh_state() {
        let dir = TempDir::new().unwrap();
        let state = load_state(&dir.path().join("state.json"), &names(&["a", "b"])).unwrap();
        assert!(state.processed_ids().is_empty());
        assert_eq!(state.last_processed, "");
        assert_eq!(state.count("a"), 0);
        assert_eq!(state.category_counts().len(), 2);
    }

    #[test]
    fn new_categories_are_added_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"lastProcessed": "2026-01-01T00:00:00Z", "processedIds": ["1", "2", "1"], "categories": {"a": 3}}"#,
        )
        .unwrap();

        let state = load_state(&path, &names(&["a", "pottery"])).unwrap();
        assert_eq!(state.count("a"), 3);
        assert_eq!(state.count("pottery"), 0);
        assert!(state.category_counts().contains_key("pottery"));
        assert_eq!(state.processed_ids(), &["1".to_string(), "2".to_string()]);
        assert!(state.contains("2"));
    }

    #[test]
    fn null_fields_load_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"processedIds": null, "categories": null}"#).unwrap();
        let state = load_state(&path, &names(&["a"])).unwrap();
        assert!(state.processed_ids().is_empty());
        assert_eq!(state.count("a"), 0);
    }

    #[test]
    fn corrupt_state_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_state(&path, &[]).is_err());
    }

    #[test]
    fn save_then_load_round_trips_through_nested_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let store = StateStore::with_state(&path, State::fresh(&names(&["a"])));
        store.mark_processed("7", "a");
        store.stamp("2026-10-19T08:00:00Z".into());
        store.save().unwrap();

        let reloaded = load_state(&path, &names(&["a"])).unwrap();
        assert_eq!(reloaded.processed_ids(), &["7".to_string()]);
        assert_eq!(reloaded.count("a"), 1);
        assert_eq!(reloaded.last_processed, "2026-10-19T08:00:00Z");
    }
}
