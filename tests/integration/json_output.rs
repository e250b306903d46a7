//! End-to-end: index, query, write JSON, read it back.

use super::common::{pets, write_tree};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use trawl::{index_path_into, json, InvertedIndex, QueryEngine, SearchMode};

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_counts_and_index_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut index = InvertedIndex::new();
    index.add_terms(["hello", "world", "hello"], "greeting.txt", 1);
    index.add_terms(["world"], "planet.txt", 1);

    let counts = dir.path().join("counts.json");
    let postings = dir.path().join("index.json");
    json::write_counts(&counts, &index).unwrap();
    json::write_index(&postings, &index).unwrap();

    assert_eq!(read_json(&counts), json!({"greeting.txt": 3, "planet.txt": 1}));
    assert_eq!(
        read_json(&postings),
        json!({
            "hello": {"greeting.txt": [1, 3]},
            "world": {"greeting.txt": [2], "planet.txt": [1]}
        })
    );
}

#[test]
fn test_results_file_keys_by_canonical_query() {
    let dir = tempfile::tempdir().unwrap();
    let queries = dir.path().join("queries.txt");
    fs::write(&queries, "Dogs cats\nfish\ncats dog\n").unwrap();

    let engine = Arc::new(QueryEngine::new(Arc::new(pets()), SearchMode::Exact));
    engine.run_query_file(&queries).unwrap();

    let out = dir.path().join("results.json");
    json::write_results(&out, &engine.results()).unwrap();
    let value = read_json(&out);

    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["cat dog", "fish"]);

    let fish = &value["fish"];
    assert_eq!(fish.as_array().unwrap().len(), 1);
    assert_eq!(fish[0]["where"], "pets/fish.txt");
    assert_eq!(fish[0]["count"], 1);
    assert!((fish[0]["score"].as_f64().unwrap() - 1.0 / 6.0).abs() < 1e-12);
}

#[test]
fn test_empty_outputs_are_empty_objects() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("input/blank.txt", "   ")]);

    let mut index = InvertedIndex::new();
    index_path_into(&dir.path().join("input"), &mut index).unwrap();

    let counts = dir.path().join("counts.json");
    let results = dir.path().join("results.json");
    json::write_counts(&counts, &index).unwrap();
    json::write_results(&results, &Default::default()).unwrap();

    assert_eq!(read_json(&counts), json!({}));
    assert_eq!(read_json(&results), json!({}));
}
