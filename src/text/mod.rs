// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning raw text into index terms.
//!
//! The pipeline is `clean -> split -> stem`:
//!
//! 1. NFD normalize (decompose characters into base + combining marks)
//! 2. Drop everything that is neither alphabetic nor whitespace. Combining
//!    marks, digits and punctuation all go here, so "café" becomes "cafe" and
//!    "don't" becomes "dont".
//! 3. Lowercase
//! 4. Split on whitespace
//! 5. English Snowball stemming
//!
//! Documents and queries go through the same pipeline, which is the only thing
//! that makes a query term comparable to an indexed term.

pub mod html;

use std::collections::BTreeSet;

use rust_stemmers::{Algorithm, Stemmer as Snowball};
use unicode_normalization::UnicodeNormalization;

/// Clean text for tokenizing: strip diacritics and non-letters, lowercase.
pub fn clean(text: &str) -> String {
    text.nfd()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Clean and split text into words.
pub fn parse(text: &str) -> Vec<String> {
    clean(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// English stemmer. Cheap to build, safe to share between threads.
pub struct Stemmer {
    inner: Snowball,
}

impl Stemmer {
    pub fn new() -> Self {
        Self {
            inner: Snowball::create(Algorithm::English),
        }
    }

    /// Stem one already-cleaned word.
    pub fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }

    /// Stems of every word in `text`, in order, duplicates kept.
    pub fn list_stems(&self, text: &str) -> Vec<String> {
        clean(text)
            .split_whitespace()
            .map(|word| self.stem(word))
            .collect()
    }

    /// Sorted, deduplicated stems of `text`.
    pub fn unique_stems(&self, text: &str) -> BTreeSet<String> {
        clean(text)
            .split_whitespace()
            .map(|word| self.stem(word))
            .collect()
    }
}

impl Default for Stemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Stemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Stemmer(English)")
    }
}

/// A query line reduced to its cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalQuery {
    pub terms: BTreeSet<String>,
    /// `terms` joined by single spaces.
    pub key: String,
}

impl CanonicalQuery {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Stem, deduplicate and sort a query line.
///
/// "Dogs cat" and "cat dog dog" both become `cat dog`.
pub fn canonical_query(line: &str, stemmer: &Stemmer) -> CanonicalQuery {
    let terms = stemmer.unique_stems(line);
    let key = terms.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
    CanonicalQuery { terms, key }
}
