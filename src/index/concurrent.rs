// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Thread-safe wrapper around [`InvertedIndex`].
//!
//! The wrapper owns a private index behind a `parking_lot::RwLock` and every
//! method takes the lock it needs. Reads (lookups,
//! counts, search) share the read lock and never block each other; `add_term`
//! and `merge` take the write lock.
//!
//! Hot-path writers should not call `add_term` per word. Build a private
//! `InvertedIndex` and `merge` it once: one write-lock acquisition per document
//! instead of one per token.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::{RwLock, RwLockReadGuard};

use super::inverted::{InvertedIndex, Positions};
use crate::search::{SearchMode, SearchResult, Searcher};

#[derive(Debug, Default)]
pub struct ConcurrentIndex {
    inner: RwLock<InvertedIndex>,
}

impl ConcurrentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&self, term: &str, location: &str, position: usize) -> bool {
        self.inner.write().add_term(term, location, position)
    }

    /// Fold a worker-local index into the shared one.
    ///
    /// Callers must only merge disjoint observations (each location built by one
    /// worker). Overlap does not corrupt the counts but is not an intended use.
    pub fn merge(&self, partial: InvertedIndex) {
        if partial.is_empty() {
            return;
        }
        self.inner.write().merge(partial);
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.inner.read().has_term(term)
    }

    pub fn has_location(&self, term: &str, location: &str) -> bool {
        self.inner.read().has_location(term, location)
    }

    pub fn has_position(&self, term: &str, location: &str, position: usize) -> bool {
        self.inner.read().has_position(term, location, position)
    }

    pub fn has_count(&self, location: &str) -> bool {
        self.inner.read().has_count(location)
    }

    /// Locations containing `term`, in order.
    pub fn locations(&self, term: &str) -> Vec<String> {
        self.inner
            .read()
            .locations(term)
            .map(str::to_string)
            .collect()
    }

    /// Positions of `term` at `location` (empty if none).
    pub fn positions(&self, term: &str, location: &str) -> Positions {
        self.inner
            .read()
            .positions(term, location)
            .cloned()
            .unwrap_or_default()
    }

    pub fn frequency(&self, term: &str, location: &str) -> usize {
        self.inner.read().frequency(term, location)
    }

    pub fn word_count(&self, location: &str) -> usize {
        self.inner.read().word_count(location)
    }

    pub fn terms(&self) -> BTreeSet<String> {
        self.inner.read().terms().map(str::to_string).collect()
    }

    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.inner.read().counts().clone()
    }

    pub fn term_count(&self) -> usize {
        self.inner.read().term_count()
    }

    pub fn location_count(&self) -> usize {
        self.inner.read().location_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn search(&self, terms: &BTreeSet<String>, mode: SearchMode) -> Vec<SearchResult> {
        self.inner.read().search(terms, mode)
    }

    pub fn exact_search(&self, terms: &BTreeSet<String>) -> Vec<SearchResult> {
        self.search(terms, SearchMode::Exact)
    }

    pub fn partial_search(&self, terms: &BTreeSet<String>) -> Vec<SearchResult> {
        self.search(terms, SearchMode::Partial)
    }

    /// Hold the read lock while walking the whole structure (serializers).
    ///
    /// Writers block until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, InvertedIndex> {
        self.inner.read()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> InvertedIndex {
        self.inner.read().clone()
    }

    pub fn into_inner(self) -> InvertedIndex {
        self.inner.into_inner()
    }
}

impl From<InvertedIndex> for ConcurrentIndex {
    fn from(index: InvertedIndex) -> Self {
        Self {
            inner: RwLock::new(index),
        }
    }
}

impl Searcher for ConcurrentIndex {
    fn search(&self, terms: &BTreeSet<String>, mode: SearchMode) -> Vec<SearchResult> {
        ConcurrentIndex::search(self, terms, mode)
    }
}
