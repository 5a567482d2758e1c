//! Error types for ellsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from building or querying a [`Router`](crate::Router).
#[derive(Debug, Error)]
pub enum RouterError {
    /// A stream name was looked up that the router does not define.
    #[error("unknown stream '{name}'")]
    UnknownStream { name: String },

    /// Reverse lookup found no stream whose roots prefix the given pair.
    #[error("stream {from} => {to} was not found in router")]
    StreamNotFound { from: String, to: String },

    /// Reverse lookup matched a stream, but the two sides name different subdirectories.
    #[error("inconsistent subdirectories: from side '{from_suffix}', to side '{to_suffix}'")]
    InconsistentSubdir {
        from_suffix: String,
        to_suffix: String,
    },

    /// Stream names must be non-empty and must not contain `:`.
    #[error("invalid stream name '{name}': names must be non-empty and must not contain ':'")]
    InvalidStreamName { name: String },

    /// A stream was declared with an empty `from` or `to` root.
    #[error("stream '{name}' has an empty '{side}' root")]
    EmptyRoot { name: String, side: &'static str },

    /// Underlying I/O failure while reading the router file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error on load — includes file path and line context from serde_json.
    #[error("failed to parse router at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience constructor for [`RouterError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RouterError {
    RouterError::Io {
        path: path.into(),
        source,
    }
}
