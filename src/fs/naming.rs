//! File name helpers for matching and pairing.

use std::ffi::{OsStr, OsString};
use std::fs::FileType;
use std::path::{Path, PathBuf};

/// Split a file name into its basename and extension.
///
/// The extension is the text after the last dot. A name whose only dot is
/// leading (".hidden") has no extension and is its own basename.
pub fn split_extension(name: &OsStr) -> (&OsStr, Option<&OsStr>) {
    let path = Path::new(name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => (stem, Some(ext)),
        _ => (name, None),
    }
}

/// Check whether a file name ends with any of the given suffixes.
///
/// This is a plain suffix test: "photo.jpg" ends with "jpg", ".jpg" and "g".
pub fn ends_with_any<S: AsRef<str>>(name: &OsStr, suffixes: &[S]) -> bool {
    let bytes = name.as_encoded_bytes();
    suffixes
        .iter()
        .any(|suffix| bytes.ends_with(suffix.as_ref().as_bytes()))
}

/// Build `basename.ext` in the same directory as `path`.
pub fn sibling_with_extension(path: &Path, basename: &OsStr, ext: &str) -> PathBuf {
    let mut name = OsString::with_capacity(basename.len() + ext.len() + 1);
    name.push(basename);
    name.push(".");
    name.push(ext);
    path.with_file_name(name)
}

/// Whether a directory entry is a regular file, resolving symlinks.
///
/// Symlinks are resolved so a link to a file counts as a file while a link
/// to a directory is skipped.
pub fn is_regular_file(file_type: FileType, path: &Path) -> bool {
    file_type.is_file() || (file_type.is_symlink() && path.is_file())
}
