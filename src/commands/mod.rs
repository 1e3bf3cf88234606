//! Command implementations behind the CLI.
//!
//! Each command resolves its targets, runs [`crate::sync::sync_target`]
//! against the disk store and reports outcomes through [`crate::output`].

/// Ad-hoc run from command-line patterns
pub mod run;
/// Task file driven synchronization
pub mod sync;

use crate::output;
use crate::sync::{SyncMode, SyncOutcome};
use std::path::Path;

/// Prints a one-line summary of `outcome` for target `name`.
///
/// Paths are shown relative to `base_dir` when they live under it.
pub fn report_outcome(name: &str, outcome: &SyncOutcome, mode: SyncMode, base_dir: &Path) {
    let SyncOutcome::Synced(report) = outcome else {
        output::info(&format!("{name}: no dest configured, skipped"));
        return;
    };

    let shown = report
        .manifest
        .strip_prefix(base_dir)
        .unwrap_or(&report.manifest)
        .display()
        .to_string();

    match (mode, report.changed) {
        (SyncMode::Write, true) => output::action(
            "updated",
            &format!(
                "{name}: {shown} (+{} new, {} kept)",
                report.added.len(),
                report.retained
            ),
        ),
        (SyncMode::Check, true) => output::warning(&format!(
            "{name}: {shown} is out of date ({} new references)",
            report.added.len()
        )),
        (_, false) => output::info(&format!("{name}: {shown} up to date")),
    }

    for reference in &report.added {
        output::verbose(&format!("  + {reference}"));
    }
}

/// Returns `true` if a check-mode run found at least one stale manifest.
#[must_use]
pub fn any_stale(mode: SyncMode, outcomes: &[SyncOutcome]) -> bool {
    mode == SyncMode::Check && outcomes.iter().any(SyncOutcome::changed)
}
