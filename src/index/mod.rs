// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index implementations.
//!
//! - `inverted`: the single-owner `term -> location -> positions` structure
//! - `concurrent`: the shared, read/write-locked wrapper used by the pool

pub mod concurrent;
pub mod inverted;

pub use concurrent::ConcurrentIndex;
pub use inverted::{InvertedIndex, Positions, Postings};
