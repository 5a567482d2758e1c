//! One module per subcommand.

pub mod list;
pub mod rename;
pub mod resolve;
pub mod sync;
pub mod syncdirs;

use clap::Args;
use colored::Colorize;

use ellsync_sync::{SyncEvent, SyncOptions, SyncOutcome};

/// Mode flags shared by `sync` and `syncdirs`.
#[derive(Args, Debug, Clone, Copy)]
pub struct ModeArgs {
    /// Actually mirror; without this rsync runs with --dry-run.
    #[arg(long)]
    pub apply: bool,

    /// Compare file contents by checksum instead of timestamp and size.
    #[arg(long)]
    pub thorough: bool,

    /// Reset cache timestamps before mirroring (only runs with --apply).
    #[arg(long)]
    pub reset_times: bool,
}

impl From<ModeArgs> for SyncOptions {
    fn from(m: ModeArgs) -> Self {
        SyncOptions {
            apply: m.apply,
            thorough: m.thorough,
            reset_times: m.reset_times,
        }
    }
}

/// Print pipeline progress: commands as rendered, output lines verbatim.
pub fn print_event(event: SyncEvent<'_>) {
    match event {
        SyncEvent::Command(cmd) => println!("{cmd}"),
        SyncEvent::Skipped(cmd) => println!("{} {cmd}", "[dry-run] skipped:".yellow()),
        SyncEvent::Output(line) => println!("{line}"),
    }
}

pub fn print_outcome(outcome: &SyncOutcome) {
    let pair = &outcome.plan.pair;
    let name = pair.stream.as_ref().map(|s| s.as_str()).unwrap_or_default();
    if outcome.plan.apply {
        println!("{} '{name}' synced ({} => {})", "✓".green(), pair.from, pair.to);
    } else {
        println!(
            "[dry-run] {} '{name}' checked ({} => {}); re-run with --apply to mirror",
            "✓".green(),
            pair.from,
            pair.to
        );
    }
}
