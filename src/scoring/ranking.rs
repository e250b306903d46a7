// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! Sort order:
//! 1. **Score** - descending
//! 2. **Count** - descending, so a long document that matches often beats a
//!    short one with the same ratio
//! 3. **Location** - ascending, ignoring case
//! 4. **Location** - ascending, byte order
//!
//! The last step only matters for locations that differ in case alone, but it
//! is what makes this a strict total order: two distinct locations never compare
//! equal, so sorting is deterministic no matter how the accumulator iterated.

use crate::search::SearchResult;
use std::cmp::Ordering;

/// Compare two search results for ranking. `Less` means `a` ranks first.
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.count.cmp(&a.count))
        .then_with(|| compare_ignore_case(&a.location, &b.location))
        .then_with(|| a.location.cmp(&b.location))
}

/// Case-insensitive lexicographic comparison.
fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Sort results in place by [`compare_results`].
pub fn sort_results(results: &mut [SearchResult]) {
    results.sort_by(compare_results);
}
