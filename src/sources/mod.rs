use anyhow::Result;
use async_trait::async_trait;

use crate::domain::Item;

pub mod bird;

pub use bird::BirdSource;

#[async_trait]
pub trait BookmarkSource: Send + Sync {
    async fn list_ids(&self, limit: usize) -> Result<Vec<String>>;

    /// Fetches the item text. `thread_text` is left empty; see `fetch_thread`.
    async fn fetch_item(&self, id: &str) -> Result<Item>;

    /// Auxiliary context for an item. `Ok(None)` means there is none.
    async fn fetch_thread(&self, id: &str) -> Result<Option<String>>;

    async fn remove(&self, id: &str) -> Result<()>;
}
