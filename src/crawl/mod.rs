// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded, deduplicating web crawler.
//!
//! Every location moves through the same stages:
//!
//! ```text
//! Queued ──▶ Fetching ──▶ Parsed ──▶ Expanded
//!                │            └────▶ Terminal
//!                └──▶ (abandoned: fetch failed or not HTML)
//! ```
//!
//! Admission is the interesting part. A location is submitted to the pool only
//! if it has never been seen *and* the run has not yet enqueued `cap` locations.
//! Both checks and both updates happen under one lock ([`Frontier`]), so two
//! workers cannot admit the same URL and cannot jointly overshoot the cap. The
//! counter moves at enqueue time, not completion time: `cap` bounds work
//! submitted. Failed fetches can leave the crawl with fewer indexed pages than
//! `cap`, never more enqueued ones.
//!
//! Each page is tokenized into a private [`InvertedIndex`] and merged into the
//! shared one once, after its links have been offered to the frontier. The crawl
//! is done when the pool goes idle; tasks submit their children before they
//! finish, so idleness cannot be observed early.

pub mod fetch;

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

use crate::error::{Result, TrawlError};
use crate::index::{ConcurrentIndex, InvertedIndex};
use crate::pool::WorkPool;
use crate::text::html::{canonical_location, list_links, strip_html};
use crate::text::Stemmer;

pub use fetch::{Fetcher, HttpFetcher};

/// Where a location is in its fetch → parse → index pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlStage {
    Queued,
    Fetching,
    Parsed,
    /// Indexed, and at least one child was admitted.
    Expanded,
    /// Indexed with nothing further admitted (no links, or cap reached).
    Terminal,
}

/// Outcome of one crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Locations admitted to the pool. Never exceeds the cap.
    pub enqueued: usize,
    /// Pages fetched and merged into the index.
    pub indexed: usize,
    /// Responses that were not HTML (treated as empty content).
    pub skipped: usize,
    /// Fetches that failed outright.
    pub failed: usize,
}

/// Visited set and admission counter. Always mutated together.
#[derive(Debug)]
struct Frontier {
    visited: HashSet<Url>,
    enqueued: usize,
    cap: usize,
}

impl Frontier {
    fn new(cap: usize) -> Self {
        Self {
            visited: HashSet::new(),
            enqueued: 0,
            cap,
        }
    }

    /// Admit `url` if it is new and the cap has room.
    fn admit(&mut self, url: &Url) -> bool {
        if self.enqueued >= self.cap || self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.clone());
        self.enqueued += 1;
        true
    }

    /// Undo `admit` for a location that never reached the pool.
    fn release(&mut self, url: &Url) {
        if self.visited.remove(url) {
            self.enqueued -= 1;
        }
    }
}

/// Crawls into a shared index using a shared pool.
pub struct Crawler<F> {
    index: Arc<ConcurrentIndex>,
    pool: Arc<WorkPool>,
    fetcher: Arc<F>,
}

impl<F: Fetcher + 'static> Crawler<F> {
    pub fn new(index: Arc<ConcurrentIndex>, pool: Arc<WorkPool>, fetcher: F) -> Self {
        Self {
            index,
            pool,
            fetcher: Arc::new(fetcher),
        }
    }

    /// Crawl from `seed`, enqueueing at most `cap` locations. Blocks until the pool is idle.
    ///
    /// An unreachable seed is not an error: the report just shows nothing indexed.
    pub fn crawl(&self, seed: &Url, cap: usize) -> CrawlReport {
        let run = Arc::new(CrawlRun {
            index: Arc::clone(&self.index),
            pool: Arc::clone(&self.pool),
            fetcher: Arc::clone(&self.fetcher),
            stemmer: Stemmer::new(),
            frontier: Mutex::new(Frontier::new(cap)),
            indexed: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        });

        tracing::info!(%seed, cap, "starting crawl");
        run.enqueue(canonical_location(seed));
        self.pool.await_idle();

        let report = run.report();
        tracing::info!(
            enqueued = report.enqueued,
            indexed = report.indexed,
            skipped = report.skipped,
            failed = report.failed,
            "crawl finished"
        );
        report
    }

    /// Parse `seed` and crawl from it.
    pub fn crawl_str(&self, seed: &str, cap: usize) -> Result<CrawlReport> {
        let url = Url::parse(seed.trim()).map_err(|source| TrawlError::InvalidUrl {
            url: seed.to_string(),
            source,
        })?;
        Ok(self.crawl(&url, cap))
    }
}

/// State for a single crawl, shared by all of its tasks.
struct CrawlRun<F> {
    index: Arc<ConcurrentIndex>,
    pool: Arc<WorkPool>,
    fetcher: Arc<F>,
    stemmer: Stemmer,
    frontier: Mutex<Frontier>,
    indexed: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl<F: Fetcher + 'static> CrawlRun<F> {
    /// Offer `url` to the frontier; submit a task for it if admitted.
    fn enqueue(self: &Arc<Self>, url: Url) -> bool {
        if !self.frontier.lock().admit(&url) {
            return false;
        }
        tracing::debug!(%url, stage = ?CrawlStage::Queued);

        let run = Arc::clone(self);
        let task_url = url.clone();
        let submitted = self.pool.submit(move || run.visit(task_url));
        if let Err(e) = submitted {
            tracing::warn!(%url, error = %e, "could not submit crawl task");
            self.frontier.lock().release(&url);
            self.failed.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    fn visit(self: &Arc<Self>, url: Url) {
        tracing::debug!(%url, stage = ?CrawlStage::Fetching);
        let html = match self.fetcher.fetch(&url) {
            Ok(Some(html)) => html,
            Ok(None) => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
                return;
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "fetch failed, abandoning location");
                self.failed.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };

        let mut local = InvertedIndex::new();
        local.add_terms(self.stemmer.list_stems(&strip_html(&html)), url.as_str(), 1);
        tracing::debug!(%url, stage = ?CrawlStage::Parsed, words = local.word_count(url.as_str()));

        let mut admitted = 0;
        for link in list_links(&url, &html) {
            if self.enqueue(link) {
                admitted += 1;
            }
        }
        let stage = if admitted > 0 {
            CrawlStage::Expanded
        } else {
            CrawlStage::Terminal
        };
        tracing::debug!(%url, stage = ?stage, admitted);

        self.index.merge(local);
        self.indexed.fetch_add(1, Ordering::Relaxed);
    }

    fn report(&self) -> CrawlReport {
        CrawlReport {
            enqueued: self.frontier.lock().enqueued,
            indexed: self.indexed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
