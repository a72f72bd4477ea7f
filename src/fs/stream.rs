//! Asynchronous discovery on top of `tokio::fs`.
//!
//! Same matching and pairing rules as the blocking iterators. Subdirectories
//! are visited depth-first from an explicit stack, and only one directory
//! handle is open at a time.

use std::path::{Path, PathBuf};

use futures::stream::{self, Stream};
use tokio::fs::{self, ReadDir};

use crate::fs::validation::{validate_extensions, validate_root};
use crate::error::Result;
use crate::fs::naming::ends_with_any;
use crate::fs::pairs::{Pair, PairRules, PairTable};

/// One step of reading the current directory.
enum Found {
    File(PathBuf),
    /// Subdirectory, special file or dangling link.
    Other,
    /// The current directory has been read and closed.
    End,
}

/// Directory reader shared by both streams.
struct AsyncWalk {
    pending_dirs: Vec<PathBuf>,
    current: Option<ReadDir>,
    recursive: bool,
}

impl AsyncWalk {
    fn new(root: &Path, recursive: bool) -> Self {
        Self {
            pending_dirs: vec![root.to_path_buf()],
            current: None,
            recursive,
        }
    }

    fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Open the next pending directory if none is being read.
    ///
    /// Returns `None` once every directory has been read.
    async fn ensure_open(&mut self) -> Option<Result<()>> {
        if self.current.is_none() {
            let dir = self.pending_dirs.pop()?;
            match fs::read_dir(&dir).await {
                Ok(entries) => {
                    tracing::debug!("Reading {}", dir.display());
                    self.current = Some(entries);
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
        Some(Ok(()))
    }

    /// Read one entry of the current directory.
    ///
    /// A failed read closes the directory. Subdirectories are queued when
    /// walking recursively.
    async fn next_entry(&mut self) -> Result<Found> {
        let Some(entries) = self.current.as_mut() else {
            return Ok(Found::End);
        };

        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                self.current = None;
                return Ok(Found::End);
            }
            Err(e) => {
                self.current = None;
                return Err(e.into());
            }
        };

        let path = entry.path();
        let file_type = entry.file_type().await?;

        if file_type.is_dir() {
            if self.recursive {
                self.pending_dirs.push(path);
            }
            return Ok(Found::Other);
        }

        let is_file = file_type.is_file()
            || (file_type.is_symlink() && symlink_is_file(&path).await);

        if is_file {
            Ok(Found::File(path))
        } else {
            Ok(Found::Other)
        }
    }
}

/// Whether a symlink resolves to a regular file.
///
/// A link that cannot be resolved is skipped like any other non-file.
async fn symlink_is_file(path: &Path) -> bool {
    match fs::metadata(path).await {
        Ok(metadata) => metadata.is_file(),
        Err(e) => {
            tracing::trace!("Skipping unresolvable link {}: {}", path.display(), e);
            false
        }
    }
}

/// Async counterpart of [`by_ext`](crate::fs::by_ext).
pub fn by_ext_async<P, S>(
    root: P,
    extensions: &[S],
    recursive: bool,
) -> Result<impl Stream<Item = Result<PathBuf>>>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let root = root.as_ref();
    validate_root(root)?;
    validate_extensions(extensions)?;

    let extensions: Vec<String> = extensions.iter().map(|e| e.as_ref().to_string()).collect();
    let mut walk = AsyncWalk::new(root, recursive);
    if extensions.is_empty() {
        walk.pending_dirs.clear();
    }

    Ok(stream::unfold(
        (walk, extensions),
        |(mut walk, extensions)| async move {
            loop {
                match walk.ensure_open().await {
                    None => return None,
                    Some(Err(e)) => return Some((Err(e), (walk, extensions))),
                    Some(Ok(())) => {}
                }

                match walk.next_entry().await {
                    Ok(Found::File(path)) => {
                        let matched = path
                            .file_name()
                            .is_some_and(|name| ends_with_any(name, &extensions));
                        if matched {
                            tracing::trace!("Matched {}", path.display());
                            return Some((Ok(path), (walk, extensions)));
                        }
                    }
                    Ok(Found::Other | Found::End) => {}
                    Err(e) => return Some((Err(e), (walk, extensions))),
                }
            }
        },
    ))
}

/// Async counterpart of [`by_ext_first_pairs`](crate::fs::by_ext_first_pairs).
pub fn by_ext_first_pairs_async<P, S>(
    root: P,
    key_ext: &str,
    paired_exts: &[S],
    recursive: bool,
) -> Result<impl Stream<Item = Result<Pair>>>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let root = root.as_ref();
    validate_root(root)?;
    let rules = PairRules::new(key_ext, paired_exts)?;

    let walk = AsyncWalk::new(root, recursive);

    Ok(stream::unfold(
        (walk, rules, PairTable::new()),
        |(mut walk, rules, mut table)| async move {
            loop {
                match walk.ensure_open().await {
                    None => return None,
                    Some(Err(e)) => return Some((Err(e), (walk, rules, table))),
                    Some(Ok(())) => {}
                }

                match walk.next_entry().await {
                    Ok(Found::File(path)) => {
                        if let Some(pair) = table.offer(&rules, path) {
                            tracing::trace!(
                                "Paired {} with {}",
                                pair.0.display(),
                                pair.1.display()
                            );
                            return Some((Ok(pair), (walk, rules, table)));
                        }
                    }
                    Ok(Found::Other) => {}
                    Ok(Found::End) => {
                        let unmatched = table.unmatched();
                        if unmatched > 0 {
                            tracing::debug!("Dropping {} unmatched basename(s)", unmatched);
                        }
                        table = PairTable::new();
                    }
                    Err(e) => {
                        if !walk.is_open() {
                            table = PairTable::new();
                        }
                        return Some((Err(e), (walk, rules, table)));
                    }
                }
            }
        },
    ))
}
