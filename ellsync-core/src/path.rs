//! Path string rules shared by every resolution step.
//!
//! Resolved directories are kept as strings that always end with `/`. With
//! that canonical form a plain string-prefix test can decide whether one
//! directory lies under another: `canonical/` is not a prefix of
//! `canonical2/`, whereas the bare `canonical` would be.

/// The separator appended by [`normalize`].
pub const SEPARATOR: char = '/';

/// Ensure `dir` ends with a separator. Idempotent.
pub fn normalize(dir: &str) -> String {
    let mut out = dir.to_owned();
    if !out.ends_with(SEPARATOR) {
        out.push(SEPARATOR);
    }
    out
}

/// Join `sub` onto `root`.
///
/// An absolute `sub` replaces `root` entirely. Otherwise exactly one
/// separator ends up between the two parts. The result is not normalized;
/// callers that need the canonical form wrap it in [`normalize`].
pub fn join(root: &str, sub: &str) -> String {
    if sub.starts_with(SEPARATOR) {
        return sub.to_owned();
    }
    if root.is_empty() {
        return sub.to_owned();
    }
    let mut out = normalize(root);
    out.push_str(sub);
    out
}

/// Return what follows `prefix` in `path`, if `path` starts with it.
pub fn suffix_after<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)
}
