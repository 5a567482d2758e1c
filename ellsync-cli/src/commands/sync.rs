//! `ellsync <ROUTER> sync <stream[:subdir]>...` — mirror streams in order.

use anyhow::{Context, Result};
use clap::Args;

use ellsync_core::{OsFilesystem, Router};
use ellsync_sync::{sync_streams, SystemRunner};

use super::{print_event, print_outcome, ModeArgs};

/// Arguments for `ellsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Streams to sync, as `name` or `name:subdir`. Processed in order; the
    /// first failure stops the rest.
    #[arg(required = true, value_name = "STREAM[:SUBDIR]")]
    pub streams: Vec<String>,

    #[command(flatten)]
    pub mode: ModeArgs,
}

impl SyncArgs {
    pub fn run(self, router: &Router) -> Result<()> {
        let outcomes = sync_streams(
            router,
            self.streams.as_slice(),
            self.mode.into(),
            &OsFilesystem,
            &mut SystemRunner,
            &mut print_event,
        )
        .with_context(|| format!("sync failed for {}", self.streams.join(", ")))?;

        for outcome in &outcomes {
            print_outcome(outcome);
        }
        Ok(())
    }
}
