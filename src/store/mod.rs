//! File-store capability used by the synchronizer.
//!
//! Every filesystem interaction a sync run needs (glob expansion, directory
//! classification, reading and writing the manifest) goes through the
//! [`FileStore`] trait. Production code uses [`DiskStore`]; tests use the
//! deterministic [`MemoryStore`].
//!
//! Patterns handed to [`FileStore::glob`] are already anchored to an
//! absolute base directory by the resolver, so implementations never
//! consult the process working directory.

mod disk;
mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Filesystem operations required to maintain a manifest.
pub trait FileStore {
    /// Expands a single glob pattern into matching paths.
    ///
    /// Directories are included; order is the expansion engine's order.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Classifies `path` without following a final symlink.
    ///
    /// # Errors
    ///
    /// Returns an error if the path vanished or cannot be inspected.
    fn is_dir(&self, path: &Path) -> Result<bool>;

    /// Returns whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Reads the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Truncates and overwrites the file with `contents`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written, including when its
    /// parent directory does not exist.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}
