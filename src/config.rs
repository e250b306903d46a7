// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration.
//!
//! Everything has a default. The CLI fills in what the user asked for and
//! `validate()` folds nonsensical values back to the defaults instead of failing,
//! so a bad `--threads 0` still produces a working run.

use std::time::Duration;

use crate::search::SearchMode;

/// Worker threads used when multi-threading is requested without a count.
pub const DEFAULT_THREADS: usize = 5;

/// Locations a crawl may enqueue when no cap is given.
pub const DEFAULT_CRAWL_CAP: usize = 1;

/// Redirects a single fetch may follow.
pub const DEFAULT_REDIRECTS: usize = 3;

/// Wall-clock limit for one HTTP request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Worker threads. `None` means single-threaded mode.
    pub threads: Option<usize>,
    pub crawl_cap: usize,
    pub redirects: usize,
    pub fetch_timeout: Duration,
    pub mode: SearchMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: None,
            crawl_cap: DEFAULT_CRAWL_CAP,
            redirects: DEFAULT_REDIRECTS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            mode: SearchMode::Exact,
        }
    }
}

impl Config {
    /// Fold out-of-range values back to their defaults.
    pub fn validate(mut self) -> Self {
        if let Some(threads) = self.threads {
            if threads < 1 {
                tracing::warn!(threads, "thread count must be positive, using {}", DEFAULT_THREADS);
                self.threads = Some(DEFAULT_THREADS);
            }
        }
        if self.crawl_cap < 1 {
            tracing::warn!("crawl cap must be positive, using {}", DEFAULT_CRAWL_CAP);
            self.crawl_cap = DEFAULT_CRAWL_CAP;
        }
        self
    }

    /// Force multi-threaded mode (a crawl always needs the pool).
    pub fn require_threads(&mut self) {
        if self.threads.is_none() {
            self.threads = Some(DEFAULT_THREADS);
        }
    }

    pub fn is_multithreaded(&self) -> bool {
        self.threads.is_some()
    }

    /// Threads to start, or `DEFAULT_THREADS` in single-threaded mode.
    pub fn worker_count(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS).max(1)
    }
}
