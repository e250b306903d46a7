//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use trawl::InvertedIndex;

// Re-export canonical test utilities from trawl::testing
pub use trawl::testing::{index_from_texts, recount, CountingSearcher, MemoryWeb};

// ============================================================================
// FIXTURES
// ============================================================================

/// Small corpus whose stems overlap in useful ways (cat/cats/car, dog/dogs).
pub const PETS: &[(&str, &str)] = &[
    ("pets/cats.txt", "Cats are curious. A cat sleeps on the car."),
    ("pets/dogs.txt", "Dogs chase cats. The dog barks at the car and the cart."),
    ("pets/fish.txt", "Fish swim. Nothing else happens here."),
];

pub fn pets() -> InvertedIndex {
    index_from_texts(PETS)
}

/// Write `(relative path, contents)` pairs under `root`, creating directories.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

// ============================================================================
// INVARIANTS
// ============================================================================

/// Every recorded count equals the positions actually stored, and no
/// location has a zero count.
pub fn assert_counts_consistent(index: &InvertedIndex) {
    for (location, &count) in index.counts() {
        assert!(count > 0, "zero count recorded for {location}");
        assert_eq!(count, recount(index, location), "count mismatch for {location}");
    }
    for postings in index.entries().values() {
        for (location, positions) in postings {
            assert!(!positions.is_empty(), "empty position set at {location}");
            assert!(index.has_count(location), "no count for {location}");
        }
    }
}

/// Simple HTML page with a title paragraph and links.
pub fn html_page(body: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{href}">link</a> "#))
        .collect();
    format!("<html><head><title>ignored</title></head><body><p>{body}</p> {anchors}</body></html>")
}
