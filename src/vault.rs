use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

#[async_trait]
pub trait VaultWriter: Send + Sync {
    async fn write(&self, path: &Path, content: &str) -> Result<()>;
}

pub struct FsVault;

#[async_trait]
impl VaultWriter for FsVault {
    async fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("failed to write {}", path.display()))
    }
}
