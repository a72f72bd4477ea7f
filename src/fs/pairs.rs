//! Basename pairing across extensions.
//!
//! Files are paired per directory: a file carrying the key extension is
//! matched with the first file sharing its basename whose extension is one of
//! the paired extensions. Listing order is whatever the filesystem returns,
//! so either side of a pair may be seen first:
//!
//! - key first: the basename waits in `keys_seen` until a paired file arrives
//! - paired first: the paired path waits in `pending_paired` until the key
//!   file arrives; later paired files with the same basename are ignored
//!
//! Both tables are dropped when the directory has been read. Unmatched
//! basenames produce nothing and never reach another directory.

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::fs::{self, ReadDir};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::fs::validation::{validate_pairing, validate_root};
use crate::error::{Error, Result};
use crate::fs::naming::{is_regular_file, sibling_with_extension, split_extension};

/// A `(key file, paired file)` match.
pub type Pair = (PathBuf, PathBuf);

/// Which side of a pair a file extension belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Key,
    Paired,
}

/// Validated extensions for one pairing scan.
#[derive(Debug, Clone)]
pub(crate) struct PairRules {
    key_ext: String,
    paired_exts: Vec<String>,
}

impl PairRules {
    pub(crate) fn new<S: AsRef<str>>(key_ext: &str, paired_exts: &[S]) -> Result<Self> {
        validate_pairing(key_ext, paired_exts)?;

        Ok(Self {
            key_ext: key_ext.to_string(),
            paired_exts: paired_exts.iter().map(|e| e.as_ref().to_string()).collect(),
        })
    }

    fn classify(&self, ext: &std::ffi::OsStr) -> Option<Role> {
        if ext == self.key_ext.as_str() {
            Some(Role::Key)
        } else if self.paired_exts.iter().any(|p| ext == p.as_str()) {
            Some(Role::Paired)
        } else {
            None
        }
    }
}

/// Pending matches for a single directory.
#[derive(Debug, Default)]
pub(crate) struct PairTable {
    keys_seen: HashSet<OsString>,
    pending_paired: HashMap<OsString, PathBuf>,
}

impl PairTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a file of this directory, returning a pair if it completes one.
    pub(crate) fn offer(&mut self, rules: &PairRules, path: PathBuf) -> Option<Pair> {
        let name = path.file_name()?;
        let (basename, ext) = split_extension(name);
        let role = rules.classify(ext?)?;

        match role {
            Role::Key => {
                if let Some(paired) = self.pending_paired.remove(basename) {
                    return Some((path, paired));
                }
                self.keys_seen.insert(basename.to_os_string());
                None
            }
            Role::Paired => {
                if self.keys_seen.remove(basename) {
                    let key = sibling_with_extension(&path, basename, &rules.key_ext);
                    return Some((key, path));
                }
                let basename = basename.to_os_string();
                self.pending_paired.entry(basename).or_insert(path);
                None
            }
        }
    }

    /// Number of basenames still waiting for their counterpart.
    pub(crate) fn unmatched(&self) -> usize {
        self.keys_seen.len() + self.pending_paired.len()
    }
}

/// Where the directories to pair come from.
#[derive(Debug)]
enum DirSource {
    Walk(walkdir::IntoIter),
    Single(Option<PathBuf>),
}

impl DirSource {
    fn next_dir(&mut self) -> Option<Result<PathBuf>> {
        match self {
            DirSource::Single(root) => root.take().map(Ok),
            DirSource::Walk(walker) => loop {
                match walker.next()? {
                    Ok(entry) if entry.depth() == 0 || entry.file_type().is_dir() => {
                        return Some(Ok(entry.into_path()));
                    }
                    Ok(_) => continue,
                    Err(e) => return Some(Err(Error::Walk(e))),
                }
            },
        }
    }
}

/// A directory being read, with its pending table.
#[derive(Debug)]
struct DirPairer {
    dir: PathBuf,
    entries: ReadDir,
    table: PairTable,
}

impl DirPairer {
    fn open(dir: PathBuf) -> Result<Self> {
        let entries = fs::read_dir(&dir)?;
        tracing::debug!("Pairing files in {}", dir.display());

        Ok(Self {
            dir,
            entries,
            table: PairTable::new(),
        })
    }

    fn next_pair(&mut self, rules: &PairRules) -> Option<Result<Pair>> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => return Some(Err(e.into())),
            };

            if !is_regular_file(file_type, &path) {
                continue;
            }

            if let Some(pair) = self.table.offer(rules, path) {
                tracing::trace!("Paired {} with {}", pair.0.display(), pair.1.display());
                return Some(Ok(pair));
            }
        }

        None
    }

    fn finish(self) {
        let unmatched = self.table.unmatched();
        if unmatched > 0 {
            tracing::debug!(
                "Dropping {} unmatched basename(s) in {}",
                unmatched,
                self.dir.display()
            );
        }
    }
}

/// Lazy sequence of key/paired file matches.
///
/// Created by [`by_ext_first_pairs`]. Every pair of a directory is produced
/// before the next directory is opened.
#[derive(Debug)]
pub struct FirstPairs {
    rules: PairRules,
    dirs: DirSource,
    current: Option<DirPairer>,
    done: bool,
}

/// Pair files under `root` by basename.
///
/// The first element of each pair has extension `key_ext`; the second has the
/// first of `paired_exts` met while reading that directory. Which paired
/// extension wins when several are present is unspecified. Extensions are
/// given without the leading dot and `key_ext` must not be among
/// `paired_exts`.
///
/// Arguments are validated before any filesystem access; I/O failures are
/// yielded as `Err` items when reached.
pub fn by_ext_first_pairs<P, S>(
    root: P,
    key_ext: &str,
    paired_exts: &[S],
    recursive: bool,
) -> Result<FirstPairs>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let root = root.as_ref();
    validate_root(root)?;
    let rules = PairRules::new(key_ext, paired_exts)?;

    let dirs = if recursive {
        DirSource::Walk(WalkDir::new(root).follow_links(false).into_iter())
    } else {
        DirSource::Single(Some(root.to_path_buf()))
    };

    tracing::debug!(
        "Pairing .{} with {:?} under {} (recursive: {})",
        rules.key_ext,
        rules.paired_exts,
        root.display(),
        recursive
    );

    Ok(FirstPairs {
        rules,
        dirs,
        current: None,
        done: false,
    })
}

impl FirstPairs {
    /// Pair files in the whole subtree below `root`.
    pub fn recursive<P, S>(root: P, key_ext: &str, paired_exts: &[S]) -> Result<Self>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        by_ext_first_pairs(root, key_ext, paired_exts, true)
    }
}

impl Iterator for FirstPairs {
    type Item = Result<Pair>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            if let Some(pairer) = self.current.as_mut() {
                if let Some(item) = pairer.next_pair(&self.rules) {
                    return Some(item);
                }
                if let Some(pairer) = self.current.take() {
                    pairer.finish();
                }
            }

            match self.dirs.next_dir() {
                Some(Ok(dir)) => match DirPairer::open(dir) {
                    Ok(pairer) => self.current = Some(pairer),
                    Err(e) => return Some(Err(e)),
                },
                Some(Err(e)) => return Some(Err(e)),
                None => self.done = true,
            }
        }
    }
}

impl FusedIterator for FirstPairs {}
