//! ellsync — route named sync streams to rsync.
//!
//! # Usage
//!
//! ```text
//! ellsync <ROUTER> list [--all] [--json]
//! ellsync <ROUTER> sync <stream[:subdir]>... [--apply] [--thorough] [--reset-times]
//! ellsync <ROUTER> syncdirs <from-dir> <to-dir> [--apply] [--thorough] [--reset-times]
//! ellsync <ROUTER> rename <stream[:subdir]> <existing> <new> [--apply]
//! ellsync <ROUTER> resolve <from-dir> <to-dir>
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::{
    list::ListArgs, rename::RenameArgs, resolve::ResolveArgs, sync::SyncArgs,
    syncdirs::SyncDirsArgs,
};
use ellsync_core::Router;
use ellsync_sync::SyncError;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "ellsync",
    version,
    about = "Mirror canonical directories onto their caches, by stream name",
    long_about = None,
)]
struct Cli {
    /// JSON file describing the streams (`{"name": {"from": ..., "to": ...}}`).
    router: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List streams whose directories are both present.
    List(ListArgs),

    /// Mirror one or more streams, in the order given.
    Sync(SyncArgs),

    /// Mirror an explicit directory pair that belongs to a configured stream.
    Syncdirs(SyncDirsArgs),

    /// Rename a subdirectory on both sides of a stream.
    Rename(RenameArgs),

    /// Find the stream an explicit directory pair belongs to.
    Resolve(ResolveArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let router = Router::load_at(&cli.router)
        .with_context(|| format!("failed to load router '{}'", cli.router.display()))?;

    match cli.command {
        Commands::List(args) => args.run(&router),
        Commands::Sync(args) => args.run(&router),
        Commands::Syncdirs(args) => args.run(&router),
        Commands::Rename(args) => args.run(&router),
        Commands::Resolve(args) => args.run(&router),
    }
}

/// A failed external command's own exit code, else 1.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|e| e.downcast_ref::<SyncError>())
        .and_then(SyncError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
