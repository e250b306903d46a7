// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index text files from disk.
//!
//! Discovery ([`walk`]) and tokenizing ([`document`]) are separate so the
//! single-threaded and pooled paths share both. In the pooled path every file
//! is one task: it builds a private index and merges it into the shared one
//! exactly once, so the shared write lock is taken once per file rather than
//! once per word.

pub mod document;
pub mod walk;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::index::{ConcurrentIndex, InvertedIndex};
use crate::pool::WorkPool;
use crate::text::Stemmer;

pub use document::{index_file, location_of};
pub use walk::{collect_files, is_text_file, Discovered, TEXT_EXTENSIONS};

/// Outcome of indexing a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Files found and handed to the indexer.
    pub files: usize,
    /// Files that could not be read, plus entries that could not be walked.
    pub failed: usize,
}

/// Index `path` into a plain index on the calling thread.
///
/// Unreadable files and entries are logged and counted, not fatal. Only a
/// missing root is an error.
pub fn index_path_into(path: &Path, index: &mut InvertedIndex) -> Result<BuildReport> {
    let Discovered { files, failed } = collect_files(path)?;
    let stemmer = Stemmer::new();
    let mut report = BuildReport {
        files: files.len(),
        failed,
    };

    for file in &files {
        match index_file(file, &stemmer) {
            Ok(local) => index.merge(local),
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "could not index file");
                report.failed += 1;
            }
        }
    }

    tracing::info!(root = %path.display(), files = report.files, failed = report.failed, "indexed");
    Ok(report)
}

/// Index `path` into a shared index, one pool task per file. Blocks until the pool is idle.
pub fn index_path(path: &Path, index: &Arc<ConcurrentIndex>, pool: &WorkPool) -> Result<BuildReport> {
    let Discovered { files, failed } = collect_files(path)?;
    let stemmer = Arc::new(Stemmer::new());
    let failed = Arc::new(AtomicUsize::new(failed));

    for file in &files {
        let file = file.clone();
        let index = Arc::clone(index);
        let stemmer = Arc::clone(&stemmer);
        let failed = Arc::clone(&failed);

        pool.submit(move || match index_file(&file, &stemmer) {
            Ok(local) => index.merge(local),
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "could not index file");
                failed.fetch_add(1, Ordering::Relaxed);
            }
        })?;
    }
    pool.await_idle();

    let report = BuildReport {
        files: files.len(),
        failed: failed.load(Ordering::Relaxed),
    };
    tracing::info!(root = %path.display(), files = report.files, failed = report.failed, "indexed");
    Ok(report)
}
