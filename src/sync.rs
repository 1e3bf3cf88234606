//! One synchronization run: resolve the file selection, parse the existing
//! manifest, merge, and write (or only check).

use crate::config::TargetConfig;
use crate::manifest::{self, writer};
use crate::resolver;
use crate::store::FileStore;
use crate::utils::paths;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span};

/// Whether a run persists the regenerated manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Rewrite the manifest.
    #[default]
    Write,
    /// Compute the verdict without touching the manifest.
    Check,
}

/// What a run did to one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Absolute path of the manifest.
    pub manifest: PathBuf,
    /// References newly added to the owned section.
    pub added: Vec<String>,
    /// Previously owned references carried over.
    pub retained: usize,
    /// Whether the manifest content differs (or would differ) from before.
    pub changed: bool,
    /// Whether the manifest was written.
    pub written: bool,
}

/// Result of synchronizing one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The target has no `dest`; nothing was done.
    Skipped,
    /// The manifest was processed.
    Synced(SyncReport),
}

impl SyncOutcome {
    /// Returns `true` if the manifest changed or would change.
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, Self::Synced(report) if report.changed)
    }
}

/// Synchronizes the manifest of `target`.
///
/// Relative patterns and the destination resolve against `base_dir`, which
/// must be absolute. A target without `dest` is skipped.
///
/// # Errors
///
/// Returns an error if a pattern is invalid, a matched path cannot be
/// inspected, or the manifest cannot be read or written. Nothing is
/// retried.
pub fn sync_target<S: FileStore + ?Sized>(
    store: &S,
    base_dir: &Path,
    target: &TargetConfig,
    mode: SyncMode,
) -> Result<SyncOutcome> {
    let Some(dest) = &target.dest else {
        debug!("No dest configured, skipping");
        return Ok(SyncOutcome::Skipped);
    };

    let manifest_path = paths::resolve(base_dir, dest);
    let span = span!(Level::DEBUG, "sync_target", manifest = %manifest_path.display());
    let _guard = span.enter();

    let manifest_dir = manifest_path.parent().unwrap_or(base_dir);

    let files = resolver::resolve_files(
        store,
        base_dir,
        target.src.as_slice(),
        target.exclude.as_slice(),
        &manifest_path,
    )?;
    let document = manifest::parse(store, &manifest_path)?;
    let merged = manifest::merge(&document, &files, manifest_dir);

    let written = match mode {
        SyncMode::Write => {
            writer::write_manifest(store, &manifest_path, &merged.lines, merged.changed)?;
            true
        }
        SyncMode::Check => false,
    };

    info!(
        added = merged.added.len(),
        retained = merged.retained,
        changed = merged.changed,
        written,
        "Synchronized manifest"
    );

    Ok(SyncOutcome::Synced(SyncReport {
        manifest: manifest_path,
        added: merged.added,
        retained: merged.retained,
        changed: merged.changed,
        written,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{target, ts_project};

    fn report(outcome: SyncOutcome) -> SyncReport {
        match outcome {
            SyncOutcome::Synced(report) => report,
            SyncOutcome::Skipped => panic!("expected the target to be synced"),
        }
    }

    #[test]
    fn test_missing_dest_is_noop() {
        let store = ts_project(&["src/a.ts"]);
        let outcome = sync_target(
            &store,
            Path::new("/project"),
            &target(&["src/*.ts"], &[], None),
            SyncMode::Write,
        )
        .unwrap();

        assert_eq!(outcome, SyncOutcome::Skipped);
        assert!(!outcome.changed());
    }

    #[test]
    fn test_creates_manifest_from_scratch() {
        let store = ts_project(&["src/a.ts", "src/b.ts"]);
        let outcome = sync_target(
            &store,
            Path::new("/project"),
            &target(&["src/*.ts"], &[], Some("refs.ts")),
            SyncMode::Write,
        )
        .unwrap();

        let report = report(outcome);
        assert!(report.changed);
        assert!(report.written);
        assert_eq!(report.manifest, PathBuf::from("/project/refs.ts"));
        assert_eq!(report.added, vec!["src/a.ts", "src/b.ts"]);
        assert_eq!(
            store.contents("/project/refs.ts").unwrap(),
            writer::render(&[
                "//grunt-start".to_string(),
                "/// <reference path=\"src/a.ts\" />".to_string(),
                "/// <reference path=\"src/b.ts\" />".to_string(),
                "//grunt-end".to_string(),
            ])
        );
    }

    #[test]
    fn test_second_run_is_unchanged() {
        let store = ts_project(&["src/a.ts", "src/b.ts"]);
        let config = target(&["src/**/*.ts"], &[], Some("refs.ts"));

        let first = sync_target(&store, Path::new("/project"), &config, SyncMode::Write).unwrap();
        let content = store.contents("/project/refs.ts");
        let second = sync_target(&store, Path::new("/project"), &config, SyncMode::Write).unwrap();

        assert!(first.changed());
        assert!(!second.changed());
        assert_eq!(store.contents("/project/refs.ts"), content);
    }

    #[test]
    fn test_manifest_inside_selection_is_not_self_referenced() {
        let store = ts_project(&["src/a.ts"]);
        let config = target(&["src/*.ts"], &[], Some("src/_refs.ts"));

        sync_target(&store, Path::new("/project"), &config, SyncMode::Write).unwrap();
        let report = report(
            sync_target(&store, Path::new("/project"), &config, SyncMode::Write).unwrap(),
        );

        assert!(!report.changed);
        assert_eq!(report.retained, 1);
        assert!(!store.contents("/project/src/_refs.ts").unwrap().contains("_refs.ts"));
    }

    #[test]
    fn test_exclude_keeps_file_out() {
        let store = ts_project(&["src/a.ts", "src/a.spec.ts"]);
        let report = report(
            sync_target(
                &store,
                Path::new("/project"),
                &target(&["src/*.ts"], &["src/*.spec.ts"], Some("refs.ts")),
                SyncMode::Write,
            )
            .unwrap(),
        );

        assert_eq!(report.added, vec!["src/a.ts"]);
    }

    #[test]
    fn test_check_mode_does_not_write() {
        let store = ts_project(&["src/a.ts"]);
        let report = report(
            sync_target(
                &store,
                Path::new("/project"),
                &target(&["src/*.ts"], &[], Some("refs.ts")),
                SyncMode::Check,
            )
            .unwrap(),
        );

        assert!(report.changed);
        assert!(!report.written);
        assert!(store.contents("/project/refs.ts").is_none());
    }

    #[test]
    fn test_missing_manifest_directory_is_fatal() {
        let store = ts_project(&["src/a.ts"]);
        let result = sync_target(
            &store,
            Path::new("/project"),
            &target(&["src/*.ts"], &[], Some("typings/refs.ts")),
            SyncMode::Write,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_manifest_in_subdirectory_uses_relative_references() {
        let store = ts_project(&["src/a.ts"]);
        store.add_dir("/project/typings");

        let report = report(
            sync_target(
                &store,
                Path::new("/project"),
                &target(&["src/*.ts"], &[], Some("typings/refs.ts")),
                SyncMode::Write,
            )
            .unwrap(),
        );

        assert_eq!(report.added, vec!["../src/a.ts"]);
    }
}
