use crate::config::Config;
use crate::store::DiskStore;
use crate::sync::{SyncMode, SyncOutcome, sync_target};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{Level, span};

/// Execute sync command - process targets from a task file
///
/// Targets run one after another in name order; the first failure aborts
/// the remaining targets.
///
/// # Errors
///
/// Returns an error if:
/// - The task file cannot be loaded or is invalid
/// - A requested target does not exist
/// - Any target fails to synchronize
pub fn execute(
    config_path: &Path,
    targets: &[String],
    mode: SyncMode,
) -> Result<Vec<SyncOutcome>> {
    let config = Config::load(config_path)?;
    let base_dir = Config::base_dir(config_path)?;
    let store = DiskStore::new();

    let mut outcomes = Vec::new();
    for (name, target) in config.select(targets)? {
        let span = span!(Level::DEBUG, "target", name);
        let _guard = span.enter();

        let outcome = sync_target(&store, &base_dir, target, mode)
            .with_context(|| format!("Target '{name}' failed"))?;
        super::report_outcome(name, &outcome, mode, &base_dir);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
