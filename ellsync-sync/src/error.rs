//! Error types for ellsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use ellsync_core::RouterError;

/// All errors that can arise from planning or executing stream operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the router (unknown stream, no match, divergent subdirs).
    #[error("router error: {0}")]
    Router(#[from] RouterError),

    /// A directory the operation needs is not present.
    #[error("directory '{path}' is not present")]
    DirectoryNotFound { path: String },

    /// A rename target is already occupied.
    #[error("directory '{path}' already exists")]
    DirectoryAlreadyExists { path: String },

    /// A rename was asked for with an unusable subdirectory name.
    #[error("invalid subdirectory '{subdir}': {reason}")]
    InvalidSubdir { subdir: String, reason: &'static str },

    /// The external command could not be started at all.
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external command ran and reported failure.
    #[error("`{command}` failed with {}", describe_code(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// The first rename of a pair failed; nothing was changed.
    #[error("failed to rename {from} to {to}: {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The from side was renamed but the to side was not. The two trees now
    /// disagree and must be reconciled by hand.
    #[error(
        "renamed {done_from} to {done_to}, but failed to rename {from} to {to}: {source}; \
         the two sides are now inconsistent"
    )]
    PartialRename {
        done_from: PathBuf,
        done_to: PathBuf,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Exit code of a failed external command, if that is what this error is.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            SyncError::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {c}"),
        None => "no exit status (terminated by signal)".to_owned(),
    }
}
