//! # ellsync-sync
//!
//! Planning and execution for stream operations.
//!
//! - [`planner::plan`] builds the `rsync` invocation for a resolved pair.
//! - [`rename::plan`] validates and orders a paired subdirectory rename.
//! - [`pipeline::sync_streams`] runs several streams strictly one after another.

pub mod command;
pub mod error;
pub mod pipeline;
pub mod planner;
pub mod rename;
pub mod runner;

pub use command::{Arg, CommandLine};
pub use error::SyncError;
pub use pipeline::{sync_dirs, sync_streams, SyncEvent, SyncOutcome};
pub use planner::{SyncOptions, SyncPlan};
pub use rename::{RenameOp, RenamePlan, Side};
pub use runner::{ProcessRunner, SystemRunner};
