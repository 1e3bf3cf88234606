//! Turns include/exclude glob patterns into the ordered list of files a
//! manifest should declare.

use crate::store::FileStore;
use crate::utils::paths;
use anyhow::{Context, Result};
use glob::Pattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};

/// Legacy suffix of stray declaration files that are never declared.
///
/// This is the literal suffix `d.td`, which does not match `.d.ts` files.
pub const STRAY_DECLARATION_SUFFIX: &str = "d.td";

/// Anchors a relative pattern to `base_dir` so expansion never depends on
/// the process working directory.
///
/// # Errors
///
/// Returns an error if `base_dir` is not valid UTF-8.
pub fn anchor_pattern(base_dir: &Path, pattern: &str) -> Result<String> {
    if Path::new(pattern).is_absolute() {
        return Ok(pattern.to_string());
    }

    let base = base_dir
        .to_str()
        .with_context(|| format!("Base directory is not valid UTF-8: {}", base_dir.display()))?;
    let relative = pattern.strip_prefix("./").unwrap_or(pattern);

    Ok(format!(
        "{}/{}",
        Pattern::escape(base.trim_end_matches('/')),
        relative
    ))
}

/// Expands `patterns` into unique paths in first-match order.
///
/// A pattern starting with `!` removes everything it matches from the
/// paths gathered so far; later positive patterns may add them back.
///
/// # Errors
///
/// Returns an error if a pattern is invalid or cannot be anchored.
pub fn expand<S: FileStore + ?Sized>(
    store: &S,
    base_dir: &Path,
    patterns: &[String],
) -> Result<Vec<PathBuf>> {
    let mut matched: Vec<PathBuf> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for pattern in patterns {
        if let Some(negated) = pattern.strip_prefix('!') {
            let removed: HashSet<PathBuf> = store
                .glob(&anchor_pattern(base_dir, negated)?)?
                .into_iter()
                .collect();
            matched.retain(|path| !removed.contains(path));
            seen.retain(|path| !removed.contains(path));
            continue;
        }

        for path in store.glob(&anchor_pattern(base_dir, pattern)?)? {
            if seen.insert(path.clone()) {
                matched.push(path);
            }
        }
    }

    Ok(matched)
}

/// Resolves the files to declare in the manifest at `manifest`.
///
/// Expands `include`, drops every path the `exclude` patterns expand to,
/// then drops directories, the manifest itself, and stray `d.td` files.
/// Returned paths are absolute, lexically resolved against `base_dir`, and
/// unique.
///
/// # Errors
///
/// Returns an error if a pattern is invalid, or if a matched path cannot
/// be inspected (for example because it vanished after expansion).
pub fn resolve_files<S: FileStore + ?Sized>(
    store: &S,
    base_dir: &Path,
    include: &[String],
    exclude: &[String],
    manifest: &Path,
) -> Result<Vec<PathBuf>> {
    let span = span!(Level::DEBUG, "resolve_files", manifest = %manifest.display());
    let _guard = span.enter();

    let mut candidates = expand(store, base_dir, include)?;
    debug!(count = candidates.len(), "Expanded include patterns");

    if !exclude.is_empty() {
        let excluded: HashSet<PathBuf> = expand(store, base_dir, exclude)?.into_iter().collect();
        candidates.retain(|path| !excluded.contains(path));
        debug!(
            excluded = excluded.len(),
            remaining = candidates.len(),
            "Applied exclude patterns"
        );
    }

    let mut files = Vec::with_capacity(candidates.len());
    let mut seen = HashSet::new();
    for candidate in candidates {
        if store.is_dir(&candidate)? {
            continue;
        }

        let resolved = paths::resolve(base_dir, &candidate);
        if resolved == manifest {
            debug!("Skipping the manifest itself");
            continue;
        }
        if resolved.to_string_lossy().ends_with(STRAY_DECLARATION_SUFFIX) {
            debug!(path = %resolved.display(), "Skipping stray declaration file");
            continue;
        }
        if seen.insert(resolved.clone()) {
            files.push(resolved);
        }
    }

    debug!(count = files.len(), "Resolved file selection");
    Ok(files)
}
