//! Indexing files and directories from disk.

use super::common::{assert_counts_consistent, write_tree};
use std::sync::Arc;
use trawl::build::location_of;
use trawl::{index_path, index_path_into, BuildReport, ConcurrentIndex, InvertedIndex, WorkPool};

const TREE: &[(&str, &str)] = &[
    ("sherlock.txt", "The game is afoot. Elementary, my dear Watson!"),
    ("nested/poems/raven.TEXT", "Once upon a midnight dreary,\nwhile I pondered, weak and weary"),
    ("nested/notes.md", "markdown is not indexed when walking"),
    ("nested/empty.txt", ""),
    ("nested/numbers.txt", "1234 5678 !!!"),
];

#[test]
fn test_directory_walk_selects_text_files() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), TREE);

    let mut index = InvertedIndex::new();
    let report = index_path_into(dir.path(), &mut index).unwrap();

    assert_eq!(report, BuildReport { files: 4, failed: 0 });
    assert_eq!(index.counts().len(), 2);

    let sherlock = location_of(&dir.path().join("sherlock.txt"));
    assert_eq!(index.word_count(&sherlock), 8);
    assert!(index.has_position("watson", &sherlock, 8));

    let raven = location_of(&dir.path().join("nested/poems/raven.TEXT"));
    assert!(index.has_position("weari", &raven, 11));
    assert!(!index.has_term("markdown"));
    assert_counts_consistent(&index);
}

#[test]
fn test_empty_and_symbol_files_record_no_count() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), TREE);

    let mut index = InvertedIndex::new();
    index_path_into(dir.path(), &mut index).unwrap();

    assert!(!index.has_count(&location_of(&dir.path().join("nested/empty.txt"))));
    assert!(!index.has_count(&location_of(&dir.path().join("nested/numbers.txt"))));
}

#[test]
fn test_explicit_file_is_indexed_regardless_of_extension() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), TREE);
    let notes = dir.path().join("nested/notes.md");

    let mut index = InvertedIndex::new();
    let report = index_path_into(&notes, &mut index).unwrap();

    assert_eq!(report.files, 1);
    assert_eq!(index.word_count(&location_of(&notes)), 6);
}

#[test]
fn test_pooled_build_matches_serial() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), TREE);

    let mut serial = InvertedIndex::new();
    index_path_into(dir.path(), &mut serial).unwrap();

    for threads in [1, 2, 5] {
        let shared = Arc::new(ConcurrentIndex::new());
        let pool = WorkPool::new(threads);
        index_path(dir.path(), &shared, &pool).unwrap();
        pool.join_all();
        assert_eq!(shared.snapshot(), serial, "{threads} threads");
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_entry_is_counted_while_siblings_index() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), TREE);
    std::os::unix::fs::symlink(
        dir.path().join("nested/deleted.txt"),
        dir.path().join("nested/zz_dangling.txt"),
    )
    .unwrap();
    let sherlock = location_of(&dir.path().join("sherlock.txt"));

    let mut serial = InvertedIndex::new();
    let report = index_path_into(dir.path(), &mut serial).unwrap();
    assert_eq!(report, BuildReport { files: 4, failed: 1 });
    assert!(serial.has_position("watson", &sherlock, 8));

    let shared = Arc::new(ConcurrentIndex::new());
    let pool = WorkPool::new(3);
    let report = index_path(dir.path(), &shared, &pool).unwrap();
    pool.join_all();
    assert_eq!(report, BuildReport { files: 4, failed: 1 });
    assert_eq!(shared.snapshot(), serial);
    assert_counts_consistent(&serial);
}

#[test]
fn test_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let shared = Arc::new(ConcurrentIndex::new());
    let pool = WorkPool::new(2);

    assert!(index_path(&dir.path().join("absent"), &shared, &pool).is_err());
    assert!(shared.is_empty());
}
