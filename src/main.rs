use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use refsync::cli::{Cli, Commands};
use refsync::output::{self, Verbosity};
use refsync::sync::SyncMode;
use refsync::{LOG_ENV, commands};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

/// Exit code when `--check` finds a stale manifest.
const EXIT_STALE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    output::set_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            output::error(&format!("{e:#}"));
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "refsync=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

const fn mode(check: bool) -> SyncMode {
    if check { SyncMode::Check } else { SyncMode::Write }
}

fn run(cli: Cli) -> Result<i32> {
    let stale = match cli.command {
        Commands::Sync {
            targets,
            config,
            check,
        } => {
            let outcomes = commands::sync::execute(&config, &targets, mode(check))?;
            commands::any_stale(mode(check), &outcomes)
        }
        Commands::Run {
            src,
            exclude,
            dest,
            check,
        } => {
            let outcome = commands::run::execute(src, exclude, dest, mode(check))?;
            commands::any_stale(mode(check), &[outcome])
        }
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
            false
        }
    };

    Ok(if stale { EXIT_STALE } else { 0 })
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
