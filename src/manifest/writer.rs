use crate::store::FileStore;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Line separator for regenerated manifests.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Line separator for regenerated manifests.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Joins `lines` with the platform line ending.
#[must_use]
pub fn render(lines: &[String]) -> String {
    lines.join(LINE_ENDING)
}

/// Overwrites the manifest at `path` with `lines`.
///
/// The file is truncated and rewritten in place whether or not its content
/// changed. Returns `changed` so callers can report the merge verdict.
///
/// # Errors
///
/// Returns an error if the file cannot be written, for example when its
/// parent directory is missing or not writable.
pub fn write_manifest<S: FileStore + ?Sized>(
    store: &S,
    path: &Path,
    lines: &[String],
    changed: bool,
) -> Result<bool> {
    store.write(path, &render(lines))?;
    info!(path = %path.display(), lines = lines.len(), changed, "Wrote manifest");
    Ok(changed)
}
