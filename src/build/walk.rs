// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Finding the files to index.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Extensions picked up when walking a directory (compared case-insensitively).
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TEXT_EXTENSIONS
                .iter()
                .any(|wanted| ext.eq_ignore_ascii_case(wanted))
        })
}

/// Files found under a root, plus entries that could not be walked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    pub files: Vec<PathBuf>,
    /// Dangling links, unreadable directories and link loops. Each is logged.
    pub failed: usize,
}

/// Files to index under `root`.
///
/// A file given directly is always indexed, whatever its extension. A
/// directory is walked recursively in file-name order and only text files are
/// kept. Only a missing root is an error; a bad entry below it is logged,
/// counted and skipped.
pub fn collect_files(root: &Path) -> Result<Discovered> {
    if !root.is_dir() {
        // Surface a missing path as an I/O error.
        std::fs::metadata(root)?;
        return Ok(Discovered {
            files: vec![root.to_path_buf()],
            failed: 0,
        });
    }

    let mut found = Discovered::default();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_text_file(entry.path()) {
                    found.files.push(entry.into_path());
                }
            }
            Err(e) => {
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                tracing::warn!(%path, error = %e, "skipping entry");
                found.failed += 1;
            }
        }
    }
    Ok(found)
}
