// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search types shared by the index and the query engine.
//!
//! Both search modes run the same way: walk the postings of every matching
//! term once, add the position count into a `location -> matches` accumulator,
//! then turn the accumulator into scored, sorted [`SearchResult`]s. The only
//! difference is which indexed terms a query term matches, which is what
//! [`SearchMode`] selects.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::scoring::ranking::sort_results;
use crate::scoring::term_frequency;

/// Which indexed terms a query term matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// The query term itself.
    #[default]
    Exact,
    /// Every indexed term starting with the query term.
    Partial,
}

impl SearchMode {
    pub fn from_partial_flag(partial: bool) -> Self {
        if partial {
            SearchMode::Partial
        } else {
            SearchMode::Exact
        }
    }
}

/// One ranked location for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total positions of matching terms at this location.
    pub count: usize,
    /// `count / words indexed at location`.
    pub score: f64,
    #[serde(rename = "where")]
    pub location: String,
}

/// Anything a query can run against.
///
/// Implemented by the plain [`InvertedIndex`](crate::InvertedIndex) for
/// single-threaded use and by [`ConcurrentIndex`](crate::ConcurrentIndex), which
/// takes its read lock for the duration of the search.
pub trait Searcher: Send + Sync {
    fn search(&self, terms: &BTreeSet<String>, mode: SearchMode) -> Vec<SearchResult>;
}

/// Score and sort an accumulator of `location -> matches`.
///
/// Locations for which `words` reports zero are dropped.
pub(crate) fn rank<F>(matches: HashMap<&str, usize>, words: F) -> Vec<SearchResult>
where
    F: Fn(&str) -> usize,
{
    let mut results: Vec<SearchResult> = matches
        .into_iter()
        .filter_map(|(location, count)| {
            term_frequency(count, words(location)).map(|score| SearchResult {
                location: location.to_string(),
                count,
                score,
            })
        })
        .collect();

    sort_results(&mut results);
    results
}
