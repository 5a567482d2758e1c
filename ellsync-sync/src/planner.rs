//! Sync planning: what to run for one resolved pair.
//!
//! ## Plan shape
//!
//! 1. optional reset-times pre-step (`find <to> -exec touch ...`), apply only
//! 2. main mirror command (`rsync ... "<from>" "<to>"`)
//! 3. flush step (`sync`), apply only, after the main command succeeded
//!
//! Planning performs no mutation; it only checks that both directories exist.

use std::path::Path;

use ellsync_core::{Filesystem, ResolvedPair};

use crate::command::CommandLine;
use crate::error::SyncError;

/// Program used to mirror a stream.
pub const MIRROR_PROGRAM: &str = "rsync";

/// Timestamp the reset-times pre-step assigns, in `touch -t` format.
pub const RESET_TIMESTAMP: &str = "197001010000";

/// Mode switches for a sync request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Actually mutate the cache; otherwise mirror with `--dry-run`.
    pub apply: bool,
    /// Compare file contents by checksum instead of mtime and size.
    pub thorough: bool,
    /// Reset every mtime under the cache root before mirroring.
    pub reset_times: bool,
}

/// Everything that must run to sync one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    pub pair: ResolvedPair,
    pub apply: bool,
    pub pre_step: Option<CommandLine>,
    pub main: CommandLine,
    pub flush: Option<CommandLine>,
}

/// Build the plan for `pair`.
///
/// `pair.from` is checked before `pair.to`; the first missing directory is
/// reported as `SyncError::DirectoryNotFound`.
pub fn plan(
    pair: &ResolvedPair,
    options: SyncOptions,
    fs: &dyn Filesystem,
) -> Result<SyncPlan, SyncError> {
    for dir in [&pair.from, &pair.to] {
        if !fs.is_dir(Path::new(dir)) {
            return Err(SyncError::DirectoryNotFound { path: dir.clone() });
        }
    }

    let plan = SyncPlan {
        pair: pair.clone(),
        apply: options.apply,
        pre_step: options.reset_times.then(|| reset_times_command(&pair.to)),
        main: mirror_command(pair, options),
        flush: options.apply.then(flush_command),
    };
    tracing::debug!("planned: {}", plan.main);
    Ok(plan)
}

/// `rsync [--dry-run ][--checksum ]--archive --verbose --delete "<from>" "<to>"`
pub fn mirror_command(pair: &ResolvedPair, options: SyncOptions) -> CommandLine {
    CommandLine::new(MIRROR_PROGRAM)
        .word_if(!options.apply, "--dry-run")
        .word_if(options.thorough, "--checksum")
        .word("--archive")
        .word("--verbose")
        .word("--delete")
        .path(pair.from.as_str())
        .path(pair.to.as_str())
}

/// Set the mtime of everything under `to` to [`RESET_TIMESTAMP`].
pub fn reset_times_command(to: &str) -> CommandLine {
    CommandLine::new("find")
        .path(to)
        .word("-exec")
        .word("touch")
        .word("-c")
        .word("-m")
        .word("-t")
        .word(RESET_TIMESTAMP)
        .word("{}")
        .word("+")
}

/// Flush filesystem buffers to disk.
pub fn flush_command() -> CommandLine {
    CommandLine::new("sync")
}
