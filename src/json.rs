// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pretty JSON output for counts, the index and query results.
//!
//! All three are sorted maps, so output is deterministic:
//!
//! ```text
//! counts   {"a.txt": 12, ...}
//! index    {"fox": {"a.txt": [4, 9]}, ...}
//! results  {"brown fox": [{"count": 2, "score": 0.1666..., "where": "a.txt"}], ...}
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::index::InvertedIndex;
use crate::search::SearchResult;

/// Serialize `value` as pretty JSON into `writer`, followed by a newline.
pub fn write_pretty<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Serialize `value` as pretty JSON to `path`, replacing any existing file.
pub fn write_pretty_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    write_pretty(BufWriter::new(file), value)?;
    tracing::info!(path = %path.display(), "wrote json");
    Ok(())
}

pub fn write_counts(path: &Path, index: &InvertedIndex) -> Result<()> {
    write_pretty_file(path, index.counts())
}

pub fn write_index(path: &Path, index: &InvertedIndex) -> Result<()> {
    write_pretty_file(path, index.entries())
}

pub fn write_results(path: &Path, results: &BTreeMap<String, Vec<SearchResult>>) -> Result<()> {
    write_pretty_file(path, results)
}
