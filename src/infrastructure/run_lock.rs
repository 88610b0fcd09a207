use std::{
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    process,
};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use fs2::FileExt;

/// Exclusive lock next to the state file, held for the whole run so two
/// overlapping runs cannot both rewrite the processed-ID ledger.
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    pub fn acquire(state_file: &Path) -> Result<Self> {
        let path = lock_path(state_file);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to ensure directory {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("failed to open lock file {}", path.display()))?;

        match file.try_lock_exclusive() {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::WouldBlock => {
                let holder = fs::read_to_string(&path).unwrap_or_default();
                return Err(anyhow!(
                    "another run holds {} ({})",
                    path.display(),
                    holder.trim()
                ));
            }
            Err(err) => return Err(err.into()),
        }

        file.set_len(0)?;
        writeln!(file, "pid={} started={}", process::id(), Utc::now().to_rfc3339())?;
        file.flush()?;

        tracing::debug!(target: "lifecycle", path = %path.display(), "acquired run lock");
        Ok(Self { file, path })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(err) = FileExt::unlock(&self.file) {
            tracing::warn!(
                target: "lifecycle",
                error = %err,
                path = %self.path.display(),
                "failed to release run lock"
            );
        }
    }
}

fn lock_path(state_file: &Path) -> PathBuf {
    let mut name = state_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "state".into());
    name.push(".lock");
    state_file.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn second_acquire_fails_until_released() {
        let dir = TempDir::new().unwrap();
        let state = dir.path().join("state.json");

        let first = RunLock::acquire(&state).unwrap();
        assert!(dir.path().join("state.json.lock").exists());
        assert!(RunLock::acquire(&state).is_err());

        drop(first);
        assert!(RunLock::acquire(&state).is_ok());
    }
}
