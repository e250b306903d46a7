// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One file in, one private index out.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::index::InvertedIndex;
use crate::text::Stemmer;

/// Location string for a file: the path as given.
pub fn location_of(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Tokenize `path` into a fresh index, positions starting at 1.
///
/// Content that is not valid UTF-8 is treated as empty rather than as an error.
pub fn index_file(path: &Path, stemmer: &Stemmer) -> Result<InvertedIndex> {
    let bytes = fs::read(path)?;
    let mut index = InvertedIndex::new();

    match String::from_utf8(bytes) {
        Ok(text) => index.add_terms(stemmer.list_stems(&text), &location_of(path), 1),
        Err(_) => tracing::debug!(path = %path.display(), "not UTF-8, indexing as empty"),
    }

    Ok(index)
}
