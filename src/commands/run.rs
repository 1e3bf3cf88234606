use crate::config::TargetConfig;
use crate::store::DiskStore;
use crate::sync::{SyncMode, SyncOutcome, sync_target};
use crate::utils::paths;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

/// Execute run command - synchronize one manifest from command-line patterns
///
/// Patterns and `dest` resolve against the current directory. Without
/// `dest` nothing is done.
///
/// # Errors
///
/// Returns an error if no source pattern is given, the current directory
/// cannot be determined, or synchronization fails.
pub fn execute(
    src: Vec<String>,
    exclude: Vec<String>,
    dest: Option<PathBuf>,
    mode: SyncMode,
) -> Result<SyncOutcome> {
    let target = TargetConfig::new(src, exclude, dest);
    if target.src.is_empty() {
        bail!("At least one --src pattern is required");
    }

    let base_dir = paths::make_absolute(Path::new("."))?;
    let outcome = sync_target(&DiskStore::new(), &base_dir, &target, mode)?;
    super::report_outcome("run", &outcome, mode, &base_dir);
    Ok(outcome)
}
