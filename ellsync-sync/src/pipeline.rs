//! Sync pipeline entrypoints used by the CLI.
//!
//! Streams are processed strictly in the order given: each one is resolved,
//! planned and run to completion before the next is looked at. The first
//! failure stops the batch; streams after it are never attempted.

use ellsync_core::{Filesystem, ResolvedPair, Router};

use crate::command::CommandLine;
use crate::error::SyncError;
use crate::planner::{self, SyncOptions, SyncPlan};
use crate::runner::ProcessRunner;

/// Progress reported while a plan executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent<'a> {
    /// A command is about to run.
    Command(&'a CommandLine),
    /// A command was part of the plan but is not run in dry-run mode.
    Skipped(&'a CommandLine),
    /// One line of command output.
    Output(&'a str),
}

/// Result of one successfully executed plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub plan: SyncPlan,
}

/// Run `plan`: pre-step (apply only), main command, flush (apply only).
pub fn execute(
    plan: &SyncPlan,
    runner: &mut dyn ProcessRunner,
    on_event: &mut dyn FnMut(SyncEvent<'_>),
) -> Result<(), SyncError> {
    if let Some(pre) = &plan.pre_step {
        if plan.apply {
            run_step(pre, runner, on_event)?;
        } else {
            on_event(SyncEvent::Skipped(pre));
        }
    }

    run_step(&plan.main, runner, on_event)?;

    if let Some(flush) = &plan.flush {
        run_step(flush, runner, on_event)?;
    }

    if plan.apply {
        tracing::info!("synced {} => {}", plan.pair.from, plan.pair.to);
    }
    Ok(())
}

fn run_step(
    command: &CommandLine,
    runner: &mut dyn ProcessRunner,
    on_event: &mut dyn FnMut(SyncEvent<'_>),
) -> Result<(), SyncError> {
    on_event(SyncEvent::Command(command));
    runner.run(command, &mut |line| on_event(SyncEvent::Output(line)))
}

/// Plan and execute one resolved pair.
pub fn sync_pair(
    pair: &ResolvedPair,
    options: SyncOptions,
    fs: &dyn Filesystem,
    runner: &mut dyn ProcessRunner,
    on_event: &mut dyn FnMut(SyncEvent<'_>),
) -> Result<SyncOutcome, SyncError> {
    let plan = planner::plan(pair, options, fs)?;
    execute(&plan, runner, on_event)?;
    Ok(SyncOutcome { plan })
}

/// Sync each `name[:subdir]` spec in order, stopping at the first failure.
pub fn sync_streams<S: AsRef<str>>(
    router: &Router,
    specs: &[S],
    options: SyncOptions,
    fs: &dyn Filesystem,
    runner: &mut dyn ProcessRunner,
    on_event: &mut dyn FnMut(SyncEvent<'_>),
) -> Result<Vec<SyncOutcome>, SyncError> {
    let mut outcomes = Vec::with_capacity(specs.len());
    for spec in specs {
        let spec = spec.as_ref();
        let pair = router.resolve_by_name(spec)?;
        let outcome = sync_pair(&pair, options, fs, runner, on_event).map_err(|e| {
            tracing::warn!("sync of '{spec}' failed; skipping remaining streams");
            e
        })?;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Sync an explicit directory pair, provided it belongs to a configured stream.
pub fn sync_dirs(
    router: &Router,
    from_dir: &str,
    to_dir: &str,
    options: SyncOptions,
    fs: &dyn Filesystem,
    runner: &mut dyn ProcessRunner,
    on_event: &mut dyn FnMut(SyncEvent<'_>),
) -> Result<SyncOutcome, SyncError> {
    let pair = router.resolve_by_paths(from_dir, to_dir)?;
    sync_pair(&pair, options, fs, runner, on_event)
}
