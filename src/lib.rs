#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # refsync - reference manifest maintainer
//!
//! refsync keeps a generated list of `/// <reference path="..." />`
//! directives in sync with a set of source files selected by glob
//! patterns, so a compiler or bundler can consume an ordered list of
//! inputs without manual upkeep.
//!
//! Only the section between `//grunt-start` and `//grunt-end` is touched.
//! Everything before and after it is preserved line for line.
//!
//! ## Guarantees
//!
//! - **Idempotent**: a second run over an unchanged tree reports no change
//! - **Additive only**: declared references are never dropped, even when
//!   their file is gone or no longer selected
//! - **Stable order**: new files are appended after existing declarations,
//!   in selection order
//! - **No duplicates**: a path string already declared is never added again
//!
//! ## Architecture
//!
//! - [`resolver`]: include/exclude expansion and filtering
//! - [`manifest`]: parsing, merging and writing the manifest
//! - [`sync`]: one synchronization run over a [`store::FileStore`]
//! - [`store`]: disk and in-memory file stores
//! - [`config`]: TOML task file with named targets
//! - [`commands`], [`cli`], [`output`]: the command-line front-end
//!
//! ## Example Usage
//!
//! ```no_run
//! use refsync::config::TargetConfig;
//! use refsync::store::DiskStore;
//! use refsync::sync::{SyncMode, sync_target};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let target = TargetConfig::new(
//!     vec!["src/**/*.ts".to_string()],
//!     vec!["src/**/*.spec.ts".to_string()],
//!     Some("src/_references.ts".into()),
//! );
//! let outcome = sync_target(&DiskStore::new(), Path::new("/work/app"), &target, SyncMode::Write)?;
//! println!("changed: {}", outcome.changed());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Command implementations behind the CLI.
pub mod commands;

/// Task file parsing and validation.
pub mod config;

/// Manifest parsing, merging and writing.
pub mod manifest;

/// User-facing output formatting.
pub mod output;

/// File selection from glob patterns.
pub mod resolver;

/// Filesystem capability used by a sync run.
pub mod store;

/// A single synchronization run.
pub mod sync;

/// Utility functions and helpers.
pub mod utils;

#[cfg(test)]
mod test_utils;

/// Current version of the refsync binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "REFSYNC_LOG";
