// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Command-line flags for the `trawl` driver.
//!
//! Every step is optional and they always run in the same order: ingest text,
//! crawl, query, then write whichever outputs were asked for. Output flags may
//! be given without a value to use the default file name.

use std::path::PathBuf;

use clap::Parser;
use trawl::config::{Config, DEFAULT_CRAWL_CAP};
use trawl::{SearchMode, TrawlError};

#[derive(Parser, Debug)]
#[command(
    name = "trawl",
    about = "Build an inverted index from text files or a web crawl, then query it",
    version
)]
pub struct Cli {
    /// Text file or directory of .txt/.text files to index
    #[arg(long, value_name = "PATH")]
    pub text: Option<PathBuf>,

    /// Seed URL to crawl
    #[arg(long, value_name = "SEED")]
    pub html: Option<String>,

    /// Maximum number of pages to crawl (requires --html)
    #[arg(long, value_name = "N")]
    pub crawl: Option<usize>,

    /// Run multi-threaded; a bare flag uses 5 workers
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "5")]
    pub threads: Option<usize>,

    /// File of queries, one per line
    #[arg(long, value_name = "PATH")]
    pub query: Option<PathBuf>,

    /// Match indexed terms by prefix instead of exactly
    #[arg(long)]
    pub partial: bool,

    /// Write word counts per location
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "counts.json")]
    pub counts: Option<PathBuf>,

    /// Write the inverted index
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "index.json")]
    pub index: Option<PathBuf>,

    /// Write query results
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "results.json")]
    pub results: Option<PathBuf>,
}

impl Cli {
    /// Resolve flags into a validated [`Config`].
    pub fn config(&self) -> Result<Config, TrawlError> {
        if self.crawl.is_some() && self.html.is_none() {
            return Err(TrawlError::Config("--crawl needs a seed from --html".into()));
        }

        let mut config = Config {
            threads: self.threads,
            crawl_cap: self.crawl.unwrap_or(DEFAULT_CRAWL_CAP),
            mode: SearchMode::from_partial_flag(self.partial),
            ..Config::default()
        };
        if self.html.is_some() {
            config.require_threads();
        }
        Ok(config.validate())
    }
}
