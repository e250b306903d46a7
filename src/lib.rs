// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Multithreaded inverted-index search engine.
//!
//! Documents come from text files on disk or from a bounded web crawl. Both
//! are tokenized into stemmed terms with 1-based positions and merged into one
//! shared index, which then answers exact or prefix queries ranked by term
//! frequency.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────────┐
//! │  build     │   │  crawl     │──▶ fetch (HTTP / in-memory)
//! │ (walkdir)  │   │ (frontier) │
//! └─────┬──────┘   └─────┬──────┘
//!       │  private index │ per file / page
//!       ▼                ▼
//! ┌─────────────────────────────┐     ┌──────────────┐
//! │ ConcurrentIndex             │◀────│ QueryEngine  │
//! │  RwLock<InvertedIndex>      │     │ (memoized)   │
//! └─────────────────────────────┘     └──────────────┘
//!       ▲                ▲                  ▲
//!       └──────── WorkPool (tasks) ─────────┘
//! ```
//!
//! | Module    | Role                                            |
//! |-----------|-------------------------------------------------|
//! | `pool`    | Fixed worker threads with idle tracking         |
//! | `index`   | Term → location → positions, plus word counts   |
//! | `search`  | Exact and prefix search, results                |
//! | `scoring` | Term frequency and result ordering              |
//! | `text`    | Cleaning, stemming, HTML stripping, links       |
//! | `build`   | Indexing files and directories                  |
//! | `crawl`   | Bounded, deduplicating crawler                  |
//! | `query`   | Canonical queries and result memoization        |
//! | `json`    | Output writers                                  |
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use trawl::{InvertedIndex, QueryEngine, SearchMode};
//! use trawl::text::Stemmer;
//!
//! let stemmer = Stemmer::new();
//! let mut index = InvertedIndex::new();
//! index.add_terms(stemmer.list_stems("the quick brown fox"), "a.txt", 1);
//!
//! let engine = QueryEngine::new(Arc::new(index), SearchMode::Exact);
//! let results = engine.run_query("Foxes");
//! assert_eq!(results[0].location, "a.txt");
//! assert_eq!(results[0].score, 0.25);
//! ```

pub mod build;
pub mod config;
pub mod crawl;
pub mod error;
pub mod index;
pub mod json;
pub mod pool;
pub mod query;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod text;

pub use build::{index_path, index_path_into, BuildReport};
pub use config::Config;
pub use crawl::{CrawlReport, CrawlStage, Crawler, Fetcher, HttpFetcher};
pub use error::{Result, TrawlError};
pub use index::{ConcurrentIndex, InvertedIndex, Positions, Postings};
pub use pool::WorkPool;
pub use query::QueryEngine;
pub use search::{SearchMode, SearchResult, Searcher};
