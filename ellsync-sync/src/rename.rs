//! Paired subdirectory rename.
//!
//! Renaming a subdirectory on only one side of a stream would make the next
//! sync delete it from the cache and copy it back under the new name. A
//! [`RenamePlan`] therefore renames it on both sides: from side first, then
//! to side.
//!
//! All four preconditions are checked before anything is renamed. Execution
//! itself is not transactional: if the to-side rename fails after the
//! from-side rename succeeded, [`SyncError::PartialRename`] is returned and
//! the trees are left as they are.

use std::fmt;
use std::path::Path;

use ellsync_core::{
    path::{join, normalize, SEPARATOR},
    Filesystem, Router, StreamName,
};

use crate::error::SyncError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => write!(f, "from"),
            Side::To => write!(f, "to"),
        }
    }
}

/// One directory rename on one side of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOp {
    pub side: Side,
    pub existing: String,
    pub new: String,
}

/// The validated from-side and to-side renames, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub stream: StreamName,
    pub ops: [RenameOp; 2],
}

/// Validate and order the renames of `existing` to `new` on both sides of
/// the stream named by `stream_spec`.
///
/// `stream_spec` may carry a `:subdir` suffix; an empty one is ignored and a
/// non-empty one scopes both names below that subdirectory.
///
/// Checks, in order, stopping at the first failure: from-side `existing` is
/// a directory, from-side `new` is free, to-side `existing` is a directory,
/// to-side `new` is free.
pub fn plan(
    router: &Router,
    stream_spec: &str,
    existing: &str,
    new: &str,
    fs: &dyn Filesystem,
) -> Result<RenamePlan, SyncError> {
    check_subdir(existing)?;
    check_subdir(new)?;

    let pair = router.resolve_by_name(stream_spec)?;
    let stream = pair
        .stream
        .clone()
        .unwrap_or_else(|| StreamName::from(stream_spec));

    let from = side_op(Side::From, &pair.from, existing, new);
    let to = side_op(Side::To, &pair.to, existing, new);

    for op in [&from, &to] {
        if !fs.is_dir(Path::new(&op.existing)) {
            return Err(SyncError::DirectoryNotFound {
                path: op.existing.clone(),
            });
        }
        if fs.exists(Path::new(&op.new)) {
            return Err(SyncError::DirectoryAlreadyExists {
                path: op.new.clone(),
            });
        }
    }

    Ok(RenamePlan {
        stream,
        ops: [from, to],
    })
}

/// Perform both renames, from side first.
pub fn execute(plan: &RenamePlan, fs: &dyn Filesystem) -> Result<(), SyncError> {
    let [first, second] = &plan.ops;

    fs.rename(Path::new(&first.existing), Path::new(&first.new))
        .map_err(|source| SyncError::RenameFailed {
            from: first.existing.clone().into(),
            to: first.new.clone().into(),
            source,
        })?;
    tracing::info!("renamed {} -> {}", first.existing, first.new);

    if let Err(source) = fs.rename(Path::new(&second.existing), Path::new(&second.new)) {
        tracing::warn!(
            "stream '{}' is now inconsistent: {} was renamed but {} was not",
            plan.stream,
            first.existing,
            second.existing
        );
        return Err(SyncError::PartialRename {
            done_from: first.existing.clone().into(),
            done_to: first.new.clone().into(),
            from: second.existing.clone().into(),
            to: second.new.clone().into(),
            source,
        });
    }
    tracing::info!("renamed {} -> {}", second.existing, second.new);
    Ok(())
}

fn side_op(side: Side, root: &str, existing: &str, new: &str) -> RenameOp {
    RenameOp {
        side,
        existing: normalize(&join(root, existing)),
        new: normalize(&join(root, new)),
    }
}

fn check_subdir(subdir: &str) -> Result<(), SyncError> {
    let reason = if subdir.trim_matches(SEPARATOR).is_empty() {
        "must name a subdirectory"
    } else if subdir.starts_with(SEPARATOR) {
        "must be relative to the stream root"
    } else {
        return Ok(());
    };
    Err(SyncError::InvalidSubdir {
        subdir: subdir.to_owned(),
        reason,
    })
}
