// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers and their order.
//!
//! A result's score is plain term frequency: matches at a location divided by
//! the number of words indexed for that location. Everything else about ranking
//! is tie-breaking, and lives in [`ranking`].

pub mod ranking;

/// Term-frequency score for `matches` hits at a location holding `words` words.
///
/// Returns `None` for a location with no words; such a location can never be
/// ranked.
#[inline]
pub fn term_frequency(matches: usize, words: usize) -> Option<f64> {
    (words > 0).then(|| matches as f64 / words as f64)
}
