use super::FileStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// [`FileStore`] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl DiskStore {
    /// Creates a new disk-backed store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileStore for DiskStore {
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let entries =
            glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => paths.push(path),
                // Unreadable directories are skipped, not fatal
                Err(e) => warn!(
                    path = %e.path().display(),
                    error = %e.error(),
                    "Skipping unreadable path during glob expansion"
                ),
            }
        }

        debug!(pattern, matches = paths.len(), "Expanded glob pattern");
        Ok(paths)
    }

    fn is_dir(&self, path: &Path) -> Result<bool> {
        let metadata = fs::symlink_metadata(path)
            .with_context(|| format!("Failed to inspect {}", path.display()))?;
        Ok(metadata.is_dir())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }
}
