// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The plain, single-owner inverted index.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **COUNT_MATCHES_POSTINGS**: `counts[loc]` equals the number of
//!    `(term, loc, position)` triples stored for `loc`. It is bumped exactly
//!    when a triple is new, never recomputed on the side.
//! 2. **NO_EMPTY_ENTRIES**: every stored term has at least one location and
//!    every stored location at least one position; a location with no triples
//!    has no `counts` entry.
//! 3. **ORDERED**: terms, locations and positions iterate in ascending order, so
//!    prefix search is a bounded range scan and serialization needs no sorting.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;

use crate::search::{rank, SearchMode, SearchResult, Searcher};

/// Positions of one term at one location.
pub type Positions = BTreeSet<usize>;

/// `location -> positions` for one term.
pub type Postings = BTreeMap<String, Positions>;

/// Mapping of `term -> location -> positions`, plus per-location word counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    index: BTreeMap<String, Postings>,
    counts: BTreeMap<String, usize>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `term` at `position` in `location`.
    ///
    /// Returns `false` (and changes nothing) if the triple was already present.
    pub fn add_term(&mut self, term: &str, location: &str, position: usize) -> bool {
        let positions = self
            .index
            .entry(term.to_string())
            .or_default()
            .entry(location.to_string())
            .or_default();

        let added = positions.insert(position);
        if added {
            *self.counts.entry(location.to_string()).or_insert(0) += 1;
        }
        added
    }

    /// Record `terms` at consecutive positions starting from `start`.
    pub fn add_terms<I, S>(&mut self, terms: I, location: &str, start: usize)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (offset, term) in terms.into_iter().enumerate() {
            self.add_term(term.as_ref(), location, start + offset);
        }
    }

    /// Fold another index into this one.
    ///
    /// Position sets are unioned per `(term, location)` and each location's count
    /// grows by the number of triples that were actually new. For indexes built
    /// from disjoint observations (the intended use: one private index per file or
    /// page) that is exactly the sum of the two counts.
    pub fn merge(&mut self, other: InvertedIndex) {
        for (term, postings) in other.index {
            match self.index.entry(term) {
                Entry::Vacant(slot) => {
                    for (location, positions) in &postings {
                        *self.counts.entry(location.clone()).or_insert(0) += positions.len();
                    }
                    slot.insert(postings);
                }
                Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    for (location, positions) in postings {
                        let target = existing.entry(location.clone()).or_default();
                        let before = target.len();
                        target.extend(positions);
                        let added = target.len() - before;
                        if added > 0 {
                            *self.counts.entry(location).or_insert(0) += added;
                        }
                    }
                }
            }
        }
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Whether `term` occurs at `location`.
    pub fn has_location(&self, term: &str, location: &str) -> bool {
        self.index
            .get(term)
            .is_some_and(|postings| postings.contains_key(location))
    }

    pub fn has_position(&self, term: &str, location: &str, position: usize) -> bool {
        self.positions(term, location)
            .is_some_and(|positions| positions.contains(&position))
    }

    /// Whether any word has been indexed for `location`.
    pub fn has_count(&self, location: &str) -> bool {
        self.counts.contains_key(location)
    }

    /// `location -> positions` for `term`, if indexed.
    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.index.get(term)
    }

    /// Locations containing `term`, in order.
    pub fn locations(&self, term: &str) -> impl Iterator<Item = &str> + '_ {
        self.index
            .get(term)
            .into_iter()
            .flat_map(|postings| postings.keys().map(String::as_str))
    }

    /// Positions of `term` at `location`, if any.
    pub fn positions(&self, term: &str, location: &str) -> Option<&Positions> {
        self.index.get(term)?.get(location)
    }

    /// Number of distinct positions of `term` at `location`.
    pub fn frequency(&self, term: &str, location: &str) -> usize {
        self.positions(term, location).map_or(0, BTreeSet::len)
    }

    /// Number of locations containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.index.get(term).map_or(0, BTreeMap::len)
    }

    /// Words indexed for `location`, or 0.
    pub fn word_count(&self, location: &str) -> usize {
        self.counts.get(location).copied().unwrap_or(0)
    }

    /// All indexed terms, in order.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    /// `location -> word count`, in location order.
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// The whole `term -> location -> positions` structure, in term order.
    pub fn entries(&self) -> &BTreeMap<String, Postings> {
        &self.index
    }

    pub fn term_count(&self) -> usize {
        self.index.len()
    }

    pub fn location_count(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Indexed terms beginning with `prefix`, in order.
    ///
    /// Starts at the first term `>= prefix` and stops at the first term that no
    /// longer has the prefix: every term sharing a prefix is contiguous in sorted
    /// order, so this never visits unrelated terms.
    pub fn terms_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Postings)> + 'a {
        self.index
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(term, _)| term.starts_with(prefix))
            .map(|(term, postings)| (term.as_str(), postings))
    }

    /// Ranked locations for query terms matched literally.
    pub fn exact_search(&self, terms: &BTreeSet<String>) -> Vec<SearchResult> {
        let mut matches: HashMap<&str, usize> = HashMap::new();
        for term in terms {
            if let Some(postings) = self.index.get(term) {
                accumulate(&mut matches, postings);
            }
        }
        rank(matches, |location| self.word_count(location))
    }

    /// Ranked locations for query terms matched as prefixes.
    ///
    /// Each query term is scanned on its own, so an indexed term matched by two
    /// overlapping prefixes (say `ca` and `cat`) counts once per prefix.
    pub fn partial_search(&self, terms: &BTreeSet<String>) -> Vec<SearchResult> {
        let mut matches: HashMap<&str, usize> = HashMap::new();
        for prefix in terms {
            for (_, postings) in self.terms_with_prefix(prefix) {
                accumulate(&mut matches, postings);
            }
        }
        rank(matches, |location| self.word_count(location))
    }

    pub fn search(&self, terms: &BTreeSet<String>, mode: SearchMode) -> Vec<SearchResult> {
        match mode {
            SearchMode::Exact => self.exact_search(terms),
            SearchMode::Partial => self.partial_search(terms),
        }
    }
}

fn accumulate<'a>(matches: &mut HashMap<&'a str, usize>, postings: &'a Postings) {
    for (location, positions) in postings {
        *matches.entry(location.as_str()).or_insert(0) += positions.len();
    }
}

impl Searcher for InvertedIndex {
    fn search(&self, terms: &BTreeSet<String>, mode: SearchMode) -> Vec<SearchResult> {
        InvertedIndex::search(self, terms, mode)
    }
}

impl std::fmt::Display for InvertedIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InvertedIndex({} terms, {} locations)",
            self.term_count(),
            self.location_count()
        )
    }
}
