//! Paired-rename validation and execution tests.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::Path;

use ellsync_core::{Filesystem, OsFilesystem, Router, RouterError};
use ellsync_sync::{
    rename::{execute, plan},
    Side, SyncError,
};
use rstest::rstest;
use tempfile::TempDir;

fn basic(root: &Path) -> Router {
    let json = format!(
        r#"{{"basic": {{"from": "{}", "to": "{}"}}}}"#,
        root.join("canonical").display(),
        root.join("cache").display()
    );
    Router::from_json("backup.json", &json).expect("router")
}

fn mkdirs(root: &Path, dirs: &[&str]) {
    for d in dirs {
        fs::create_dir_all(root.join(d)).expect("mkdir");
    }
}

/// Delegates to the real filesystem, refusing renames whose source contains
/// `refuse`.
struct FlakyFs {
    refuse: &'static str,
    renames: RefCell<usize>,
}

impl Filesystem for FlakyFs {
    fn is_dir(&self, path: &Path) -> bool {
        OsFilesystem.is_dir(path)
    }
    fn exists(&self, path: &Path) -> bool {
        OsFilesystem.exists(path)
    }
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        *self.renames.borrow_mut() += 1;
        if from.to_string_lossy().contains(self.refuse) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "refused"));
        }
        OsFilesystem.rename(from, to)
    }
}

#[rstest]
#[case("basic")]
#[case("basic:")]
fn rename_present_on_both_sides_succeeds(#[case] spec: &str) {
    let tmp = TempDir::new().expect("tempdir");
    mkdirs(tmp.path(), &["canonical/sclupture", "cache/sclupture"]);
    let router = basic(tmp.path());

    let plan = plan(&router, spec, "sclupture", "sculpture", &OsFilesystem).expect("plan");
    assert_eq!(plan.stream.0, "basic");
    assert_eq!(plan.ops[0].side, Side::From);
    assert_eq!(plan.ops[1].side, Side::To);

    execute(&plan, &OsFilesystem).expect("execute");
    for side in ["canonical", "cache"] {
        assert!(tmp.path().join(side).join("sculpture").is_dir());
        assert!(!tmp.path().join(side).join("sclupture").exists());
    }
}

#[test]
fn missing_to_side_fails_before_any_rename() {
    let tmp = TempDir::new().expect("tempdir");
    mkdirs(tmp.path(), &["canonical/sclupture", "cache"]);
    let router = basic(tmp.path());

    let err = plan(&router, "basic", "sclupture", "sculpture", &OsFilesystem).unwrap_err();
    match err {
        SyncError::DirectoryNotFound { path } => assert!(path.ends_with("cache/sclupture/")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(tmp.path().join("canonical/sclupture").is_dir(), "from side must be untouched");
    assert!(!tmp.path().join("canonical/sculpture").exists());
}

#[test]
fn missing_from_side_reported_first() {
    let tmp = TempDir::new().expect("tempdir");
    mkdirs(tmp.path(), &["canonical", "cache"]);
    let router = basic(tmp.path());

    let err = plan(&router, "basic", "sclupture", "sculpture", &OsFilesystem).unwrap_err();
    match err {
        SyncError::DirectoryNotFound { path } => assert!(path.ends_with("canonical/sclupture/")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn existing_target_on_from_side_beats_missing_to_side() {
    let tmp = TempDir::new().expect("tempdir");
    mkdirs(tmp.path(), &["canonical/sclupture", "canonical/sculpture", "cache"]);
    let router = basic(tmp.path());

    let err = plan(&router, "basic", "sclupture", "sculpture", &OsFilesystem).unwrap_err();
    match err {
        SyncError::DirectoryAlreadyExists { path } => {
            assert!(path.ends_with("canonical/sculpture/"))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn existing_target_on_to_side_is_rejected() {
    let tmp = TempDir::new().expect("tempdir");
    mkdirs(
        tmp.path(),
        &["canonical/sclupture", "cache/sclupture", "cache/sculpture"],
    );
    let router = basic(tmp.path());

    let err = plan(&router, "basic", "sclupture", "sculpture", &OsFilesystem).unwrap_err();
    assert!(matches!(
        err,
        SyncError::DirectoryAlreadyExists { ref path } if path.ends_with("cache/sculpture/")
    ));
}

#[test]
fn plain_file_at_target_name_blocks_rename() {
    let tmp = TempDir::new().expect("tempdir");
    mkdirs(tmp.path(), &["canonical/sclupture", "cache/sclupture"]);
    fs::write(tmp.path().join("cache/sculpture"), b"stray").expect("write");
    let router = basic(tmp.path());

    let err = plan(&router, "basic", "sclupture", "sculpture", &OsFilesystem).unwrap_err();
    match err {
        SyncError::DirectoryAlreadyExists { path } => assert!(path.ends_with("cache/sculpture/")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(tmp.path().join("canonical/sclupture").is_dir(), "from side must be untouched");
    assert!(!tmp.path().join("canonical/sculpture").exists());
}

#[cfg(unix)]
#[test]
fn dangling_symlink_at_target_name_blocks_rename() {
    let tmp = TempDir::new().expect("tempdir");
    mkdirs(tmp.path(), &["canonical/sclupture", "cache/sclupture"]);
    std::os::unix::fs::symlink(
        tmp.path().join("cache/nowhere"),
        tmp.path().join("cache/sculpture"),
    )
    .expect("symlink");
    let router = basic(tmp.path());

    let err = plan(&router, "basic", "sclupture", "sculpture", &OsFilesystem).unwrap_err();
    assert!(matches!(err, SyncError::DirectoryAlreadyExists { .. }));
    assert!(tmp.path().join("canonical/sclupture").is_dir());
}

#[test]
fn unknown_stream_is_router_error() {
    let tmp = TempDir::new().expect("tempdir");
    let router = basic(tmp.path());
    let err = plan(&router, "art", "a", "b", &OsFilesystem).unwrap_err();
    assert!(matches!(err, SyncError::Router(RouterError::UnknownStream { .. })));
}

#[test]
fn subdir_in_stream_spec_scopes_both_sides() {
    let tmp = TempDir::new().expect("tempdir");
    mkdirs(tmp.path(), &["canonical/art/sclupture", "cache/art/sclupture"]);
    let router = basic(tmp.path());

    let plan = plan(&router, "basic:art", "sclupture", "sculpture", &OsFilesystem).expect("plan");
    assert!(plan.ops[0].new.ends_with("canonical/art/sculpture/"));
    assert!(plan.ops[1].new.ends_with("cache/art/sculpture/"));
}

#[test]
fn failed_first_rename_changes_nothing() {
    let tmp = TempDir::new().expect("tempdir");
    mkdirs(tmp.path(), &["canonical/sclupture", "cache/sclupture"]);
    let router = basic(tmp.path());
    let fs = FlakyFs {
        refuse: "/canonical/sclupture",
        renames: RefCell::new(0),
    };

    let plan = plan(&router, "basic", "sclupture", "sculpture", &fs).expect("plan");
    let err = execute(&plan, &fs).unwrap_err();
    assert!(matches!(err, SyncError::RenameFailed { .. }), "got: {err}");
    assert_eq!(*fs.renames.borrow(), 1, "to side must not be attempted");
    assert!(tmp.path().join("cache/sclupture").is_dir());
}

#[test]
fn failed_second_rename_is_partial_and_not_rolled_back() {
    let tmp = TempDir::new().expect("tempdir");
    mkdirs(tmp.path(), &["canonical/sclupture", "cache/sclupture"]);
    let router = basic(tmp.path());
    let fs = FlakyFs {
        refuse: "/cache/sclupture",
        renames: RefCell::new(0),
    };

    let plan = plan(&router, "basic", "sclupture", "sculpture", &fs).expect("plan");
    let err = execute(&plan, &fs).unwrap_err();
    assert!(matches!(err, SyncError::PartialRename { .. }), "got: {err}");
    assert!(err.to_string().contains("inconsistent"));

    assert!(tmp.path().join("canonical/sculpture").is_dir(), "from side stays renamed");
    assert!(tmp.path().join("cache/sclupture").is_dir(), "to side keeps old name");
}
