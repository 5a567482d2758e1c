//! `ellsync <ROUTER> resolve <from-dir> <to-dir>` — reverse lookup.

use anyhow::{Context, Result};
use clap::Args;

use ellsync_core::Router;

/// Arguments for `ellsync resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    pub from_dir: String,
    pub to_dir: String,
}

impl ResolveArgs {
    pub fn run(self, router: &Router) -> Result<()> {
        let pair = router
            .resolve_by_paths(&self.from_dir, &self.to_dir)
            .with_context(|| format!("no stream for {} => {}", self.from_dir, self.to_dir))?;

        let name = pair.stream.map(|s| s.0).unwrap_or_default();
        tracing::debug!("reverse lookup matched '{name}'");
        println!("{name}: {} => {}", pair.from, pair.to);
        Ok(())
    }
}
