//! Command-line interface definitions for refsync.
//!
//! The CLI definitions are shared between the main binary and build tools
//! (like xtask) for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes, so we
//! allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for refsync.
#[derive(Parser)]
#[command(
    name = "refsync",
    version = crate::VERSION,
    about = "Keeps a block of /// <reference> directives in sync with your source files",
    long_about = "Maintains the //grunt-start ... //grunt-end section of a reference manifest. \
                  Newly matched files are appended; existing declarations are never removed."
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Synchronize the manifests of targets defined in a task file
    Sync {
        /// Targets to process (default: all, in name order)
        targets: Vec<String>,

        /// Task file to read
        #[arg(
            short,
            long,
            env = "REFSYNC_CONFIG",
            default_value = crate::config::Config::DEFAULT_FILE
        )]
        config: PathBuf,

        /// Report stale manifests without writing them (exit code 2 if any)
        #[arg(long)]
        check: bool,
    },

    /// Synchronize a single manifest from command-line patterns
    Run {
        /// Glob pattern selecting source files (repeatable, `!` negates)
        #[arg(short, long, required = true)]
        src: Vec<String>,

        /// Glob pattern whose matches are removed from the selection (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Manifest file to create or update; nothing is done without it
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Report a stale manifest without writing it (exit code 2 if stale)
        #[arg(long)]
        check: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
