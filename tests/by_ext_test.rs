//! Extension filtering against a real directory tree.

mod helpers;

use std::collections::HashSet;
use std::path::PathBuf;

use futures::StreamExt;
use helpers::{init_tracing, touch_all, Fixture};
use path_gen::{by_ext, by_ext_async, ByExt, Error, Result};

fn collect(iter: ByExt) -> Vec<PathBuf> {
    iter.collect::<Result<Vec<_>>>().expect("scan succeeds")
}

#[test]
fn test_by_ext_single() {
    let fixture = Fixture::new();
    let results = collect(by_ext(fixture.root(), &["ext1"], false).unwrap());

    assert!(results.contains(&fixture.root().join("file.ext1")));
    assert!(results.contains(&fixture.root().join("file2.ext1")));
    assert_eq!(results.len(), 2);
}

#[test]
fn test_by_ext_recursive_convenience() {
    let fixture = Fixture::new();
    let results = collect(ByExt::recursive(fixture.root(), &["ext1"]).unwrap());

    assert!(results.contains(&fixture.root().join("file.ext1")));
    assert!(results.contains(&fixture.root().join("file2.ext1")));
    assert!(results.contains(&fixture.subfolder().join("subfile.ext1")));
    assert!(results.contains(&fixture.subfolder().join("subfile2.ext1")));
    assert_eq!(results.len(), 4);
}

#[test]
fn test_by_ext_single_recursive() {
    let fixture = Fixture::new();
    let results = collect(by_ext(fixture.root(), &["ext1"], true).unwrap());
    assert_eq!(results.len(), 4);
}

#[test]
fn test_by_ext_multiple_extensions() {
    let fixture = Fixture::new();
    let results = collect(by_ext(fixture.root(), &["ext2", ".ext3"], true).unwrap());

    let expected: HashSet<PathBuf> = [
        fixture.root().join("file.ext2"),
        fixture.root().join("file.ext3"),
    ]
    .into_iter()
    .collect();
    assert_eq!(results.into_iter().collect::<HashSet<_>>(), expected);
}

#[test]
fn test_every_result_matches_and_none_omitted() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    touch_all(dir.path(), &["a.jpg", "b.JPG", "c.jpeg", "d.png", "notes.txt"]);
    touch_all(&dir.path().join("nested/deeper"), &["e.jpg", "f.png", "g.gif"]);

    let exts = [".jpg", ".png"];
    let results = collect(by_ext(dir.path(), &exts, true).unwrap());

    for path in &results {
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(exts.iter().any(|e| name.ends_with(e)), "{} should not match", name);
    }

    let names: HashSet<_> = results
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    let expected: HashSet<_> = ["a.jpg", "d.png", "e.jpg", "f.png"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names, expected);
}

#[test]
fn test_plain_suffix_without_dot() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    touch_all(dir.path(), &["photo.jpg", "photojpg", "photo.png"]);

    let results = collect(by_ext(dir.path(), &["jpg"], false).unwrap());
    assert_eq!(results.len(), 2);
}

#[test]
fn test_by_ext_fails_if_any_ext_empty() {
    assert!(matches!(
        by_ext("foo", &["", "bar"], true),
        Err(Error::InvalidExtension { .. })
    ));
}

#[test]
fn test_by_ext_fails_if_ext_empty() {
    assert!(matches!(
        by_ext("foo", &[""], true),
        Err(Error::InvalidExtension { .. })
    ));
}

#[test]
fn test_by_ext_fails_if_root_empty() {
    assert!(matches!(by_ext("", &["ext1"], true), Err(Error::EmptyRoot)));
}

#[test]
fn test_missing_root_fails_on_iteration() {
    let mut files = by_ext("/nonexistent/path/xyz", &["ext1"], false).unwrap();
    let err = files.next().unwrap().unwrap_err();
    assert!(!err.is_precondition());
}

#[test]
fn test_not_restartable_but_reinvocable() {
    let fixture = Fixture::new();

    let mut files = by_ext(fixture.root(), &["ext2"], false).unwrap();
    assert!(files.next().is_some());
    assert!(files.next().is_none());
    assert!(files.next().is_none());

    let again = collect(by_ext(fixture.root(), &["ext2"], false).unwrap());
    assert_eq!(again, vec![fixture.root().join("file.ext2")]);
}

#[test]
fn test_early_abandonment() {
    let fixture = Fixture::new();

    let first: Vec<_> = by_ext(fixture.root(), &["ext1"], true)
        .unwrap()
        .take(1)
        .collect();
    assert_eq!(first.len(), 1);
    assert!(first[0].is_ok());
}

#[test]
fn test_by_ext_async_matches_sync() {
    let fixture = Fixture::new();

    for recursive in [true, false] {
        let sync: HashSet<PathBuf> = collect(by_ext(fixture.root(), &["ext1"], recursive).unwrap())
            .into_iter()
            .collect();

        let streamed: HashSet<PathBuf> = tokio_test::block_on(async {
            by_ext_async(fixture.root(), &["ext1"], recursive)
                .unwrap()
                .map(|r| r.expect("scan succeeds"))
                .collect()
                .await
        });

        assert_eq!(sync, streamed);
    }
}
