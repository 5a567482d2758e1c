//! Domain types for the stream router.
//!
//! Directory roots are kept as `String`, not `PathBuf`: resolution compares
//! them by string prefix after [`normalize`](crate::path::normalize), and
//! `PathBuf` would drop the trailing separator that makes that comparison sound.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a stream entry in the router.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StreamName(pub String);

impl StreamName {
    /// Character reserved for the `name:subdir` syntax.
    pub const SUBDIR_DELIMITER: char = ':';

    /// Whether this name can be addressed unambiguously as `name[:subdir]`.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && !self.0.contains(Self::SUBDIR_DELIMITER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for StreamName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StreamName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// The two roots of a stream, exactly as written in the router file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamDefinition {
    /// Canonical (authoritative) root.
    pub from: String,
    /// Cache (mirror) root.
    pub to: String,
}

/// A concrete, subdir-composed directory pair for one sync or rename.
///
/// Both paths end with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPair {
    pub from: String,
    pub to: String,
    pub stream: Option<StreamName>,
}

/// One row of `list` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamListing {
    pub name: StreamName,
    pub from: String,
    pub to: String,
    /// Both roots currently exist as directories.
    pub available: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
