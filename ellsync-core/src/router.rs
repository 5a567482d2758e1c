//! The stream router.
//!
//! A [`Router`] maps stream names to their `from`/`to` roots, in the order
//! the router file declares them. It is built once per invocation and is
//! read-only afterwards.
//!
//! # Router file
//!
//! ```text
//! {
//!   "basic":  { "from": "canonical",       "to": "cache" },
//!   "photos": { "from": "/media/canonical/photos", "to": "/media/cache/photos" }
//! }
//! ```
//!
//! # Resolution
//!
//! - forward: `name[:subdir]` → concrete pair ([`Router::resolve_by_name`])
//! - reverse: concrete pair → stream ([`Router::resolve_by_paths`]); the
//!   first stream in file order whose roots prefix both paths wins.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{io_err, RouterError};
use crate::fs::Filesystem;
use crate::path::{join, normalize, suffix_after};
use crate::types::{ResolvedPair, StreamDefinition, StreamListing, StreamName};

#[derive(Debug, Clone, Default)]
pub struct Router {
    streams: IndexMap<StreamName, StreamDefinition>,
}

// ---------------------------------------------------------------------------
// 1. Construction and loading
// ---------------------------------------------------------------------------

impl Router {
    /// Build a router from already-parsed streams, validating every entry.
    pub fn new(streams: IndexMap<StreamName, StreamDefinition>) -> Result<Self, RouterError> {
        for (name, def) in &streams {
            if !name.is_valid() {
                return Err(RouterError::InvalidStreamName {
                    name: name.0.clone(),
                });
            }
            if def.from.is_empty() {
                return Err(RouterError::EmptyRoot {
                    name: name.0.clone(),
                    side: "from",
                });
            }
            if def.to.is_empty() {
                return Err(RouterError::EmptyRoot {
                    name: name.0.clone(),
                    side: "to",
                });
            }
        }
        Ok(Self { streams })
    }

    /// Parse router JSON. `origin` names the source in parse errors.
    pub fn from_json(origin: impl Into<PathBuf>, contents: &str) -> Result<Self, RouterError> {
        let streams: IndexMap<StreamName, StreamDefinition> = serde_json::from_str(contents)
            .map_err(|e| RouterError::Parse {
                path: origin.into(),
                source: e,
            })?;
        Self::new(streams)
    }

    /// Load the router file at `path`.
    ///
    /// Returns `RouterError::Io` if the file cannot be read and
    /// `RouterError::Parse` (with path + line context) if it is malformed.
    pub fn load_at(path: &Path) -> Result<Self, RouterError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let router = Self::from_json(path, &contents)?;
        tracing::debug!(
            "loaded {} stream(s) from {}",
            router.streams.len(),
            path.display()
        );
        Ok(router)
    }
}

// ---------------------------------------------------------------------------
// 2. Lookup
// ---------------------------------------------------------------------------

impl Router {
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Streams in router-file order.
    pub fn streams(&self) -> impl Iterator<Item = (&StreamName, &StreamDefinition)> {
        self.streams.iter()
    }

    /// Look up a stream by name; absent names are an error, never a default.
    pub fn get(&self, name: &str) -> Result<&StreamDefinition, RouterError> {
        self.streams
            .get(&StreamName::from(name))
            .ok_or_else(|| RouterError::UnknownStream {
                name: name.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// 3. Forward and reverse resolution
// ---------------------------------------------------------------------------

/// Split `name[:subdir]` on the first delimiter. A missing delimiter means
/// an empty subdir.
pub fn split_spec(spec: &str) -> (&str, &str) {
    spec.split_once(StreamName::SUBDIR_DELIMITER)
        .unwrap_or((spec, ""))
}

impl Router {
    /// Resolve `name` or `name:subdir` to a concrete pair.
    ///
    /// A non-empty subdir is joined onto both roots; either way the result is
    /// normalized to end with `/`.
    pub fn resolve_by_name(&self, spec: &str) -> Result<ResolvedPair, RouterError> {
        let (name, subdir) = split_spec(spec);
        let def = self.get(name)?;

        let (from, to) = if subdir.is_empty() {
            (normalize(&def.from), normalize(&def.to))
        } else {
            (
                normalize(&join(&def.from, subdir)),
                normalize(&join(&def.to, subdir)),
            )
        };

        tracing::debug!("resolved '{spec}' to {from} => {to}");
        Ok(ResolvedPair {
            from,
            to,
            stream: Some(StreamName::from(name)),
        })
    }

    /// Find the stream that `from_dir` and `to_dir` belong to.
    ///
    /// A stream matches when `from_dir` starts with its (normalized) from
    /// root and `to_dir` with its to root. The first match in router-file
    /// order wins; if its two suffixes differ the caller asked for divergent
    /// subdirectories and `RouterError::InconsistentSubdir` is returned.
    pub fn resolve_by_paths(
        &self,
        from_dir: &str,
        to_dir: &str,
    ) -> Result<ResolvedPair, RouterError> {
        let from = normalize(from_dir);
        let to = normalize(to_dir);

        for (name, def) in &self.streams {
            let from_root = normalize(&def.from);
            let to_root = normalize(&def.to);
            let (Some(from_suffix), Some(to_suffix)) =
                (suffix_after(&from, &from_root), suffix_after(&to, &to_root))
            else {
                continue;
            };

            if from_suffix != to_suffix {
                return Err(RouterError::InconsistentSubdir {
                    from_suffix: from_suffix.to_owned(),
                    to_suffix: to_suffix.to_owned(),
                });
            }

            tracing::debug!("{from} => {to} belongs to stream '{name}'");
            return Ok(ResolvedPair {
                from,
                to,
                stream: Some(name.clone()),
            });
        }

        Err(RouterError::StreamNotFound { from, to })
    }
}

// ---------------------------------------------------------------------------
// 4. Listing
// ---------------------------------------------------------------------------

impl Router {
    /// Every stream with its current availability, sorted by name.
    pub fn list_all(&self, fs: &dyn Filesystem) -> Vec<StreamListing> {
        let mut rows: Vec<StreamListing> = self
            .streams
            .iter()
            .map(|(name, def)| StreamListing {
                name: name.clone(),
                from: def.from.clone(),
                to: def.to.clone(),
                available: fs.is_dir(Path::new(&def.from)) && fs.is_dir(Path::new(&def.to)),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    /// Streams whose roots both exist as directories right now, sorted by name.
    pub fn list(&self, fs: &dyn Filesystem) -> Vec<StreamListing> {
        let mut rows = self.list_all(fs);
        rows.retain(|r| r.available);
        rows
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn basic() -> Router {
        Router::from_json(
            "backup.json",
            r#"{"basic": {"from": "canonical", "to": "cache"}}"#,
        )
        .expect("router")
    }

    #[test]
    fn split_spec_uses_first_delimiter() {
        assert_eq!(split_spec("basic"), ("basic", ""));
        assert_eq!(split_spec("basic:"), ("basic", ""));
        assert_eq!(split_spec("basic:a:b"), ("basic", "a:b"));
    }

    #[test]
    fn resolve_bare_name_normalizes_roots() {
        let pair = basic().resolve_by_name("basic").expect("resolve");
        assert_eq!(pair.from, "canonical/");
        assert_eq!(pair.to, "cache/");
        assert_eq!(pair.stream, Some(StreamName::from("basic")));
    }

    #[test]
    fn resolve_with_subdir_joins_both_sides() {
        let pair = basic().resolve_by_name("basic:thing").expect("resolve");
        assert_eq!(pair.from, "canonical/thing/");
        assert_eq!(pair.to, "cache/thing/");
    }

    #[test]
    fn unknown_stream_fails() {
        let err = basic().resolve_by_name("nope:thing").unwrap_err();
        assert!(matches!(err, RouterError::UnknownStream { ref name } if name == "nope"));
    }

    #[test]
    fn reverse_lookup_without_match_names_both_paths() {
        let err = basic().resolve_by_paths("elsewhere", "cache").unwrap_err();
        match err {
            RouterError::StreamNotFound { from, to } => {
                assert_eq!(from, "elsewhere/");
                assert_eq!(to, "cache/");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reverse_lookup_does_not_match_sibling_prefix() {
        let err = basic().resolve_by_paths("canonical2", "cache2").unwrap_err();
        assert!(matches!(err, RouterError::StreamNotFound { .. }));
    }

    #[test]
    fn empty_root_rejected() {
        let err = Router::from_json("r.json", r#"{"s": {"from": "", "to": "x"}}"#).unwrap_err();
        assert!(matches!(err, RouterError::EmptyRoot { side: "from", .. }));
    }

    #[test]
    fn delimiter_in_name_rejected() {
        let err = Router::from_json("r.json", r#"{"a:b": {"from": "x", "to": "y"}}"#).unwrap_err();
        assert!(matches!(err, RouterError::InvalidStreamName { .. }));
    }
}
