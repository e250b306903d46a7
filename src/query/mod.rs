// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query engine: canonicalize, search once, remember.
//!
//! Query files repeat themselves. "dog cat", "cat dog" and "Dogs CAT" are the
//! same query once stemmed, sorted and deduplicated, so the engine keys results
//! by that canonical string and searches each key at most once.
//!
//! The cache maps each key to a `OnceLock`. Reserving a key takes the write
//! lock just long enough to insert the empty cell; the search itself runs
//! outside the lock through `OnceLock::get_or_init`, which guarantees a single
//! initializer. A second caller racing on the same key blocks on the cell (not
//! on the cache) and receives the same results. Readers take the read lock.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::error::Result;
use crate::pool::WorkPool;
use crate::search::{SearchMode, SearchResult, Searcher};
use crate::text::{canonical_query, Stemmer};

type Cell = Arc<OnceLock<Vec<SearchResult>>>;

pub struct QueryEngine<S> {
    searcher: Arc<S>,
    mode: SearchMode,
    stemmer: Stemmer,
    results: RwLock<BTreeMap<String, Cell>>,
    pool: Option<Arc<WorkPool>>,
}

impl<S: Searcher + 'static> QueryEngine<S> {
    /// Engine that runs every query on the calling thread.
    pub fn new(searcher: Arc<S>, mode: SearchMode) -> Self {
        Self {
            searcher,
            mode,
            stemmer: Stemmer::new(),
            results: RwLock::new(BTreeMap::new()),
            pool: None,
        }
    }

    /// Engine that fans query files out over `pool`, one task per line.
    pub fn with_pool(searcher: Arc<S>, mode: SearchMode, pool: Arc<WorkPool>) -> Self {
        Self {
            pool: Some(pool),
            ..Self::new(searcher, mode)
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Results for one query line, searching only if its canonical form is new.
    ///
    /// A line with no usable terms returns an empty list and is not recorded.
    pub fn run_query(&self, line: &str) -> Vec<SearchResult> {
        let query = canonical_query(line, &self.stemmer);
        if query.is_empty() {
            return Vec::new();
        }

        let cell = self.reserve(&query.key);
        cell.get_or_init(|| {
            tracing::debug!(query = %query.key, mode = ?self.mode, "searching");
            self.searcher.search(&query.terms, self.mode)
        })
        .clone()
    }

    /// Get or create the cell for `key` under the write lock.
    fn reserve(&self, key: &str) -> Cell {
        if let Some(cell) = self.results.read().get(key) {
            return Arc::clone(cell);
        }
        let mut results = self.results.write();
        Arc::clone(results.entry(key.to_string()).or_default())
    }

    /// Run every line of a query file. With a pool, lines run in parallel and this
    /// returns once all of them are done.
    pub fn run_query_file(self: &Arc<Self>, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)?;

        match &self.pool {
            Some(pool) => {
                for line in contents.lines() {
                    let engine = Arc::clone(self);
                    let line = line.to_string();
                    pool.submit(move || {
                        engine.run_query(&line);
                    })?;
                }
                pool.await_idle();
            }
            None => {
                for line in contents.lines() {
                    self.run_query(line);
                }
            }
        }

        tracing::info!(path = %path.display(), queries = self.query_count(), "query file processed");
        Ok(())
    }

    /// Canonical keys recorded so far, in order.
    pub fn canonical_queries(&self) -> BTreeSet<String> {
        self.results.read().keys().cloned().collect()
    }

    /// Cached results for `line` (canonicalized first); empty if never run.
    pub fn results_for(&self, line: &str) -> Vec<SearchResult> {
        let query = canonical_query(line, &self.stemmer);
        self.results
            .read()
            .get(&query.key)
            .and_then(|cell| cell.get().cloned())
            .unwrap_or_default()
    }

    pub fn has_query(&self, line: &str) -> bool {
        let query = canonical_query(line, &self.stemmer);
        self.results.read().contains_key(&query.key)
    }

    pub fn query_count(&self) -> usize {
        self.results.read().len()
    }

    /// Every completed `key -> results` pair, in key order.
    pub fn results(&self) -> BTreeMap<String, Vec<SearchResult>> {
        self.results
            .read()
            .iter()
            .filter_map(|(key, cell)| cell.get().map(|results| (key.clone(), results.clone())))
            .collect()
    }
}

impl<S> std::fmt::Debug for QueryEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("mode", &self.mode)
            .field("queries", &self.results.read().len())
            .field("pooled", &self.pool.is_some())
            .finish()
    }
}
