//! Ranking of search results.

use std::collections::BTreeSet;
use trawl::{InvertedIndex, SearchResult};

fn query(terms: &[&str]) -> BTreeSet<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

fn locations(results: &[SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.location.as_str()).collect()
}

// ============================================================================
// TIE-BREAKS
// ============================================================================

#[test]
fn test_higher_score_first() {
    let mut index = InvertedIndex::new();
    index.add_terms(["apple", "pear"], "long.txt", 1);
    index.add_terms(["apple"], "short.txt", 1);

    let results = index.exact_search(&query(&["apple"]));
    assert_eq!(locations(&results), vec!["short.txt", "long.txt"]);
    assert_eq!(results[0].score, 1.0);
    assert_eq!(results[1].score, 0.5);
}

#[test]
fn test_equal_score_prefers_more_matches() {
    let mut index = InvertedIndex::new();
    index.add_terms(["apple", "pear"], "a.txt", 1);
    index.add_terms(["apple", "apple", "pear", "pear"], "b.txt", 1);

    let results = index.exact_search(&query(&["apple"]));
    assert_eq!(results[0].score, results[1].score);
    assert_eq!(locations(&results), vec!["b.txt", "a.txt"]);
}

#[test]
fn test_full_tie_sorts_by_location_ignoring_case() {
    let mut index = InvertedIndex::new();
    for location in ["beta.txt", "Alpha.txt", "gamma.txt"] {
        index.add_terms(["apple"], location, 1);
    }

    let results = index.exact_search(&query(&["apple"]));
    assert_eq!(locations(&results), vec!["Alpha.txt", "beta.txt", "gamma.txt"]);
}

#[test]
fn test_case_only_difference_is_still_ordered() {
    let mut index = InvertedIndex::new();
    index.add_terms(["apple"], "readme.txt", 1);
    index.add_terms(["apple"], "README.txt", 1);

    let first = index.exact_search(&query(&["apple"]));
    let second = index.exact_search(&query(&["apple"]));
    assert_eq!(locations(&first), vec!["README.txt", "readme.txt"]);
    assert_eq!(first, second);
}

// ============================================================================
// FIXTURE
// ============================================================================

#[test]
fn test_two_document_fixture() {
    // doc1: a b c a (4 words), doc2: a d (2 words)
    let mut index = InvertedIndex::new();
    index.add_terms(["a", "b", "c", "a"], "doc1", 1);
    index.add_terms(["a", "d"], "doc2", 1);

    let results = index.exact_search(&query(&["a"]));
    assert_eq!(
        results,
        vec![
            SearchResult { count: 2, score: 0.5, location: "doc1".into() },
            SearchResult { count: 1, score: 0.5, location: "doc2".into() },
        ]
    );
}
