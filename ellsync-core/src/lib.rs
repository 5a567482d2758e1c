//! ellsync core library — stream router, path rules, errors.
//!
//! Public API surface:
//! - [`path`] — trailing-separator normalization and join rules
//! - [`types`] — stream names, definitions and resolved pairs
//! - [`router`] — router loading, forward and reverse resolution, listing
//! - [`fs`] — the [`Filesystem`] seam used for existence checks and renames
//! - [`error`] — [`RouterError`]

pub mod error;
pub mod fs;
pub mod path;
pub mod router;
pub mod types;

pub use error::RouterError;
pub use fs::{Filesystem, OsFilesystem};
pub use router::Router;
pub use types::{ResolvedPair, StreamDefinition, StreamListing, StreamName};
