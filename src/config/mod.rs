/// Task file parsing and validation
pub mod parser;

use crate::utils::paths;
use anyhow::{Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Task file listing the manifests to maintain.
///
/// ```toml
/// [targets.app]
/// src = ["src/**/*.ts"]
/// exclude = "src/**/*.spec.ts"
/// dest = "src/_references.ts"
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Named targets, processed in name order.
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

/// One manifest and the files it should declare.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Glob patterns selecting candidate files. `!`-prefixed entries negate.
    pub src: Patterns,

    /// Patterns whose matches are removed from the `src` matches.
    #[serde(default)]
    pub exclude: Patterns,

    /// Manifest to create or update. Without it the target does nothing.
    #[serde(default)]
    pub dest: Option<PathBuf>,
}

/// One pattern or a list of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct Patterns(pub Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Patterns {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(pattern) => Self(vec![pattern]),
            OneOrMany::Many(patterns) => Self(patterns),
        }
    }
}

impl From<Vec<String>> for Patterns {
    fn from(patterns: Vec<String>) -> Self {
        Self(patterns)
    }
}

impl Patterns {
    /// The patterns as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if there is no non-empty pattern.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|pattern| pattern.trim().is_empty())
    }
}

impl TargetConfig {
    /// Builds a target directly from pattern lists.
    #[must_use]
    pub fn new(src: Vec<String>, exclude: Vec<String>, dest: Option<PathBuf>) -> Self {
        Self {
            src: src.into(),
            exclude: exclude.into(),
            dest,
        }
    }
}

impl Config {
    /// Default task file name, looked up in the working directory.
    pub const DEFAULT_FILE: &'static str = "refsync.toml";

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid TOML or unknown keys
    /// - A target fails validation
    pub fn load(path: &Path) -> Result<Self> {
        parser::parse_config_file(path)
    }

    /// Directory that relative patterns and destinations in the task file at
    /// `config_path` resolve against.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn base_dir(config_path: &Path) -> Result<PathBuf> {
        let absolute = paths::make_absolute(config_path)?;
        Ok(absolute
            .parent()
            .map_or_else(|| PathBuf::from("/"), Path::to_path_buf))
    }

    /// Selects targets by name, or all of them when `names` is empty.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unknown target.
    pub fn select(&self, names: &[String]) -> Result<Vec<(&str, &TargetConfig)>> {
        if names.is_empty() {
            return Ok(self
                .targets
                .iter()
                .map(|(name, target)| (name.as_str(), target))
                .collect());
        }

        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let Some((name, target)) = self.targets.get_key_value(name) else {
                let available: Vec<&str> = self.targets.keys().map(String::as_str).collect();
                bail!(
                    "Unknown target '{name}' (available: {})",
                    available.join(", ")
                );
            };
            selected.push((name.as_str(), target));
        }
        Ok(selected)
    }
}
