use super::FileStore;
use anyhow::{Context, Result, anyhow, bail};
use glob::{MatchOptions, Pattern};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single entry of the in-memory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    File(String),
    Dir,
    /// Listed by glob but gone by the time it is inspected.
    Vanished,
}

/// In-memory [`FileStore`] with deterministic (sorted) glob order.
///
/// Adding a file registers all of its ancestors as directories, so writes
/// succeed exactly where a real filesystem would let them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryStore::add_file`].
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Builder form of [`MemoryStore::add_dir`].
    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    /// Adds (or replaces) a file, creating its ancestor directories.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: &str) {
        let path = path.as_ref();
        self.add_ancestors(path);
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.to_string()));
    }

    /// Adds a directory and its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.add_ancestors(path);
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::Dir);
    }

    /// Adds a path that glob expansion reports but inspection cannot find.
    pub fn add_vanished(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.add_ancestors(path);
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::Vanished);
    }

    /// Removes a single entry. Returns `true` if it existed.
    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        self.nodes.borrow_mut().remove(path.as_ref()).is_some()
    }

    /// Returns the contents of a file, if one exists at `path`.
    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(Node::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }

    fn add_ancestors(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }
}

impl FileStore for MemoryStore {
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let compiled =
            Pattern::new(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        Ok(self
            .nodes
            .borrow()
            .keys()
            .filter(|path| compiled.matches_path_with(path, options))
            .cloned()
            .collect())
    }

    fn is_dir(&self, path: &Path) -> Result<bool> {
        match self.nodes.borrow().get(path) {
            Some(Node::Dir) => Ok(true),
            Some(Node::File(_)) => Ok(false),
            Some(Node::Vanished) | None => Err(anyhow!(
                "Failed to inspect {}: No such file or directory",
                path.display()
            )),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        matches!(
            self.nodes.borrow().get(path),
            Some(Node::File(_) | Node::Dir)
        )
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.nodes.borrow().get(path) {
            Some(Node::File(contents)) => Ok(contents.clone()),
            Some(Node::Dir) => bail!("Failed to read {}: Is a directory", path.display()),
            Some(Node::Vanished) | None => bail!(
                "Failed to read {}: No such file or directory",
                path.display()
            ),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && nodes.get(parent) != Some(&Node::Dir)
        {
            bail!(
                "Failed to write {}: parent directory does not exist",
                path.display()
            );
        }
        if nodes.get(path) == Some(&Node::Dir) {
            bail!("Failed to write {}: Is a directory", path.display());
        }
        nodes.insert(path.to_path_buf(), Node::File(contents.to_string()));
        Ok(())
    }
}
