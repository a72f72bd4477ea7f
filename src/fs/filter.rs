//! Extension filtering over a directory tree.

use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::fs::validation::{validate_extensions, validate_root};
use crate::error::{Error, Result};
use crate::fs::naming::{ends_with_any, is_regular_file};

/// Lazy sequence of files whose name ends with one of a set of suffixes.
///
/// Created by [`by_ext`]. No directory is opened until the first call to
/// `next`, and dropping the iterator closes any open directory handles.
#[derive(Debug)]
pub struct ByExt {
    walker: walkdir::IntoIter,
    extensions: Vec<String>,
    done: bool,
}

/// Find files under `root` whose name ends with any of `extensions`.
///
/// Matching is a plain suffix test on the file name, so include the dot
/// (".jpg") when only whole extensions should match. An empty extension list
/// yields nothing. With `recursive` unset only direct children of `root` are
/// inspected.
///
/// Arguments are validated before any filesystem access; traversal failures
/// are yielded as `Err` items when reached.
pub fn by_ext<P, S>(root: P, extensions: &[S], recursive: bool) -> Result<ByExt>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let root = root.as_ref();
    validate_root(root)?;
    validate_extensions(extensions)?;

    let extensions: Vec<String> = extensions.iter().map(|e| e.as_ref().to_string()).collect();

    let mut walker = WalkDir::new(root).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    tracing::debug!(
        "Filtering {} for {:?} (recursive: {})",
        root.display(),
        extensions,
        recursive
    );

    Ok(ByExt {
        walker: walker.into_iter(),
        done: extensions.is_empty(),
        extensions,
    })
}

impl ByExt {
    /// Filter the whole subtree below `root`.
    pub fn recursive<P, S>(root: P, extensions: &[S]) -> Result<Self>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        by_ext(root, extensions, true)
    }
}

impl Iterator for ByExt {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let entry = match self.walker.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => return Some(Err(Error::Walk(e))),
                None => {
                    self.done = true;
                    return None;
                }
            };

            if entry.depth() == 0 {
                if entry.file_type().is_dir() || entry.path().is_dir() {
                    continue;
                }
                self.done = true;
                return Some(Err(not_a_directory(entry.path())));
            }

            if !is_regular_file(entry.file_type(), entry.path()) {
                continue;
            }

            if ends_with_any(entry.file_name(), &self.extensions) {
                tracing::trace!("Matched {}", entry.path().display());
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

impl FusedIterator for ByExt {}

fn not_a_directory(path: &Path) -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("Not a directory: {}", path.display()),
    ))
}
