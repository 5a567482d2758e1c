//! Filesystem seam.
//!
//! Router listing, plan validation and rename execution only ever touch the
//! disk through [`Filesystem`], so tests can observe or refuse every call.

use std::io;
use std::path::{Path, PathBuf};

/// The filesystem operations ellsync relies on.
pub trait Filesystem {
    /// `true` if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// `true` if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Rename `from` to `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        // Resolved paths end in '/', which makes lstat fail with ENOTDIR on a
        // plain file. Rebuilding from components drops the trailing separator.
        let path: PathBuf = path.components().collect();
        // symlink_metadata so a dangling symlink still counts as occupied.
        std::fs::symlink_metadata(path).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}
