//! `ellsync <ROUTER> syncdirs <from-dir> <to-dir>`

use anyhow::{Context, Result};
use clap::Args;

use ellsync_core::{OsFilesystem, Router};
use ellsync_sync::{sync_dirs, SystemRunner};

use super::{print_event, print_outcome, ModeArgs};

/// Arguments for `ellsync syncdirs`.
#[derive(Args, Debug)]
pub struct SyncDirsArgs {
    /// Canonical directory to mirror from.
    pub from_dir: String,

    /// Cache directory to mirror to. Must sit at the same subdirectory of the
    /// same stream as `from_dir`.
    pub to_dir: String,

    #[command(flatten)]
    pub mode: ModeArgs,
}

impl SyncDirsArgs {
    pub fn run(self, router: &Router) -> Result<()> {
        let outcome = sync_dirs(
            router,
            &self.from_dir,
            &self.to_dir,
            self.mode.into(),
            &OsFilesystem,
            &mut SystemRunner,
            &mut print_event,
        )
        .with_context(|| format!("sync failed for {} => {}", self.from_dir, self.to_dir))?;

        print_outcome(&outcome);
        Ok(())
    }
}
