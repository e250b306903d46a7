// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trawl::{
    index_path, index_path_into, json, Config, ConcurrentIndex, Crawler, HttpFetcher,
    InvertedIndex, QueryEngine, SearchResult, WorkPool,
};

mod cli;
use cli::Cli;

type Results = BTreeMap<String, Vec<SearchResult>>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TRAWL_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config().context("invalid arguments")?;
    tracing::debug!(?config, "starting");

    let mut steps = Steps::default();
    if config.is_multithreaded() {
        run_pooled(cli, &config, &mut steps);
    } else {
        run_serial(cli, &config, &mut steps);
    }

    if steps.failed > 0 {
        anyhow::bail!("{} step(s) failed", steps.failed);
    }
    Ok(())
}

/// Counts failed steps; each step is reported and the run carries on.
#[derive(Default)]
struct Steps {
    failed: usize,
}

impl Steps {
    fn check<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("{:#}", e);
                self.failed += 1;
                None
            }
        }
    }
}

fn run_serial(cli: &Cli, config: &Config, steps: &mut Steps) {
    let mut index = InvertedIndex::new();
    if let Some(path) = &cli.text {
        steps.check(index_path_into(path, &mut index).with_context(|| indexing(path)));
    }

    let index = Arc::new(index);
    let mut results = Results::new();
    if let Some(path) = &cli.query {
        let engine = Arc::new(QueryEngine::new(Arc::clone(&index), config.mode));
        steps.check(engine.run_query_file(path).with_context(|| querying(path)));
        results = engine.results();
    }

    write_outputs(cli, &index, &results, steps);
}

fn run_pooled(cli: &Cli, config: &Config, steps: &mut Steps) {
    let pool = Arc::new(WorkPool::new(config.worker_count()));
    let index = Arc::new(ConcurrentIndex::new());
    tracing::info!(threads = pool.size(), "multi-threaded mode");

    if let Some(path) = &cli.text {
        steps.check(index_path(path, &index, &pool).with_context(|| indexing(path)));
    }

    if let Some(seed) = &cli.html {
        let crawled = HttpFetcher::from_config(config)
            .context("could not build http client")
            .and_then(|fetcher| {
                Crawler::new(Arc::clone(&index), Arc::clone(&pool), fetcher)
                    .crawl_str(seed, config.crawl_cap)
                    .with_context(|| format!("crawling {}", seed))
            });
        steps.check(crawled);
    }

    let mut results = Results::new();
    if let Some(path) = &cli.query {
        let engine = Arc::new(QueryEngine::with_pool(
            Arc::clone(&index),
            config.mode,
            Arc::clone(&pool),
        ));
        steps.check(engine.run_query_file(path).with_context(|| querying(path)));
        results = engine.results();
    }

    pool.join_all();
    write_outputs(cli, &index.read(), &results, steps);
}

fn write_outputs(cli: &Cli, index: &InvertedIndex, results: &Results, steps: &mut Steps) {
    if let Some(path) = &cli.counts {
        steps.check(json::write_counts(path, index).with_context(|| writing(path)));
    }
    if let Some(path) = &cli.index {
        steps.check(json::write_index(path, index).with_context(|| writing(path)));
    }
    if let Some(path) = &cli.results {
        steps.check(json::write_results(path, results).with_context(|| writing(path)));
    }
}

fn indexing(path: &Path) -> String {
    format!("indexing {}", path.display())
}

fn querying(path: &Path) -> String {
    format!("running queries from {}", path.display())
}

fn writing(path: &Path) -> String {
    format!("writing {}", path.display())
}
