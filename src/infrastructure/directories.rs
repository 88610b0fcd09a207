use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::config::env::PathConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    pub vault_dir: PathBuf,
    pub prompts_dir: PathBuf,
    pub config_file: PathBuf,
    pub state_file: PathBuf,
}

/// Creates the log directory and the parent of the state file; vault and
/// prompt directories are created lazily when something is written there.
pub fn ensure_directories(cfg: &PathConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(&cfg.logs_dir)?;
    if let Some(parent) = cfg.state_file.parent() {
        ensure_dir(parent)?;
    }

    Ok(ResolvedPaths {
        logs_dir,
        vault_dir: cfg.vault_dir.clone(),
        prompts_dir: cfg.prompts_dir.clone(),
        config_file: cfg.config_file.clone(),
        state_file: cfg.state_file.clone(),
    })
}

pub fn ensure_dir(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Ok(PathBuf::from("."));
    }
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory {}", path.display()))?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o755);
            let _ = fs::set_permissions(path, perms);
        }
    }
    Ok(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
}
