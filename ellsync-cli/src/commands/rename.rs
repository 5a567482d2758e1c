//! `ellsync <ROUTER> rename <stream[:subdir]> <existing> <new> [--apply]`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use ellsync_core::{OsFilesystem, Router};
use ellsync_sync::rename;

/// Arguments for `ellsync rename`.
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Stream whose subdirectory is renamed.
    #[arg(value_name = "STREAM[:SUBDIR]")]
    pub stream: String,

    /// Current subdirectory name, relative to the stream roots.
    pub existing: String,

    /// New subdirectory name, relative to the stream roots.
    pub new: String,

    /// Perform the renames; without this they are only shown.
    #[arg(long)]
    pub apply: bool,
}

impl RenameArgs {
    pub fn run(self, router: &Router) -> Result<()> {
        let plan = rename::plan(
            router,
            &self.stream,
            &self.existing,
            &self.new,
            &OsFilesystem,
        )
        .with_context(|| {
            format!(
                "cannot rename '{}' to '{}' in '{}'",
                self.existing, self.new, self.stream
            )
        })?;

        let prefix = if self.apply { "" } else { "[dry-run] " };
        for op in &plan.ops {
            let side = format!("{}:", op.side);
            println!("{prefix}{} {} -> {}", side.bold(), op.existing, op.new);
        }

        if !self.apply {
            println!("[dry-run] re-run with --apply to rename");
            return Ok(());
        }

        rename::execute(&plan, &OsFilesystem).context(
            "rename aborted; check both sides of the stream and reconcile by hand if needed",
        )?;
        println!(
            "{} renamed '{}' to '{}' in '{}'",
            "✓".green(),
            self.existing,
            self.new,
            plan.stream
        );
        Ok(())
    }
}
