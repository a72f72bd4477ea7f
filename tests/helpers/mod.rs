//! Test helpers for discovery integration tests
//!
//! Builds the fixture tree used across tests and installs a tracing
//! subscriber so library logs show up in failing test output.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Files created at the fixture root.
pub const ROOT_FILES: &[&str] = &["file.ext1", "file.ext2", "file.ext3", "file2.ext1"];

/// Name of the fixture subfolder.
pub const SUBFOLDER: &str = "subfolder";

/// Files created inside the fixture subfolder.
pub const SUBFOLDER_FILES: &[&str] = &["subfile.ext1", "subfile2.ext1"];

/// Install a test-friendly subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("path_gen=trace"))
        .with_test_writer()
        .try_init();
}

/// Create empty files with the given names under `dir`.
pub fn touch_all(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).expect("create fixture directory");
    for name in names {
        fs::write(dir.join(name), "").expect("create fixture file");
    }
}

/// Standard fixture:
///
/// ```text
/// root/
///   file.ext1 file.ext2 file.ext3 file2.ext1
///   subfolder/
///     subfile.ext1 subfile2.ext1
/// ```
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("create temp dir");
        touch_all(dir.path(), ROOT_FILES);
        touch_all(&dir.path().join(SUBFOLDER), SUBFOLDER_FILES);
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn subfolder(&self) -> PathBuf {
        self.dir.path().join(SUBFOLDER)
    }
}
