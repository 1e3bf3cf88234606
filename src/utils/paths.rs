use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Resolves `path` against `base` without touching the filesystem.
///
/// Relative paths are joined onto `base`; `.` components are dropped and
/// `..` components pop the previous normal component. A `..` directly under
/// the root stays at the root.
#[must_use]
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match resolved.components().next_back() {
                Some(Component::Normal(_)) => {
                    resolved.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => resolved.push(".."),
            },
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Computes the path leading from directory `base` to `target`.
///
/// Both paths are expected to be resolved (see [`resolve`]). Walks up with
/// `..` for every `base` component past the common prefix, then down into
/// the remainder of `target`. Returns an empty path when they are equal.
#[must_use]
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();

    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// Renders `target` as a reference string relative to `base_dir`.
///
/// The result always uses `/` as separator, whatever the host platform,
/// so a manifest generated on Windows reads the same as one from Unix.
#[must_use]
pub fn reference_path(base_dir: &Path, target: &Path) -> String {
    relative_path(base_dir, target)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Makes a path absolute, resolving relative paths from current directory
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined
pub fn make_absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(resolve(Path::new("/"), path))
    } else {
        let current_dir =
            std::env::current_dir().context("Failed to determine current directory")?;
        Ok(resolve(&current_dir, path))
    }
}
