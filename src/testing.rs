// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use url::Url;

use crate::crawl::Fetcher;
use crate::error::{Result, TrawlError};
use crate::index::InvertedIndex;
use crate::search::{SearchMode, SearchResult, Searcher};

/// What a [`MemoryWeb`] serves for one URL.
#[derive(Debug, Clone)]
pub enum Page {
    Html(String),
    /// A response that is not HTML (image, JSON, ...).
    Other,
    /// A connection-level failure.
    Broken,
}

/// In-memory web for crawl tests. Records every fetch.
#[derive(Debug, Default)]
pub struct MemoryWeb {
    pages: HashMap<String, Page>,
    fetches: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
}

impl MemoryWeb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` at `url`.
    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(normalize(url), Page::Html(html.to_string()));
        self
    }

    pub fn non_html(mut self, url: &str) -> Self {
        self.pages.insert(normalize(url), Page::Other);
        self
    }

    pub fn broken(mut self, url: &str) -> Self {
        self.pages.insert(normalize(url), Page::Broken);
        self
    }

    /// Sleep this long inside every fetch, to widen race windows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Times `url` was fetched.
    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches.lock().get(&normalize(url)).copied().unwrap_or(0)
    }

    /// Distinct URLs fetched.
    pub fn distinct_fetches(&self) -> usize {
        self.fetches.lock().len()
    }

    /// Largest number of times any single URL was fetched.
    pub fn max_fetches_per_url(&self) -> usize {
        self.fetches.lock().values().copied().max().unwrap_or(0)
    }
}

fn normalize(url: &str) -> String {
    Url::parse(url).map_or_else(|_| url.to_string(), String::from)
}

impl Fetcher for MemoryWeb {
    fn fetch(&self, url: &Url) -> Result<Option<String>> {
        *self.fetches.lock().entry(url.to_string()).or_insert(0) += 1;
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        match self.pages.get(url.as_str()) {
            Some(Page::Html(html)) => Ok(Some(html.clone())),
            Some(Page::Other) => Ok(None),
            Some(Page::Broken) | None => Err(TrawlError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("no route to {}", url),
            ))),
        }
    }
}

/// Wraps an index and counts how many searches reach it.
#[derive(Debug)]
pub struct CountingSearcher {
    index: InvertedIndex,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingSearcher {
    pub fn new(index: InvertedIndex) -> Self {
        Self {
            index,
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Sleep this long inside every search, so concurrent duplicates overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Searcher for CountingSearcher {
    fn search(&self, terms: &BTreeSet<String>, mode: SearchMode) -> Vec<SearchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.index.search(terms, mode)
    }
}

/// Build an index from `(location, text)` pairs through the real text pipeline.
pub fn index_from_texts(docs: &[(&str, &str)]) -> InvertedIndex {
    let stemmer = crate::text::Stemmer::new();
    let mut index = InvertedIndex::new();
    for (location, text) in docs {
        index.add_terms(stemmer.list_stems(text), location, 1);
    }
    index
}

/// Sum of position-set sizes for `location` across every term.
pub fn recount(index: &InvertedIndex, location: &str) -> usize {
    index
        .entries()
        .values()
        .filter_map(|postings| postings.get(location))
        .map(|positions| positions.len())
        .sum()
}
