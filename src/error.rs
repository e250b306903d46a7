// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type shared by the library.
//!
//! Most failures inside the pipeline never surface here: a file that cannot be
//! read or a page that cannot be fetched is logged and abandoned by the task that
//! owns it. `TrawlError` covers what a caller can actually act on.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrawlError>;

#[derive(Debug, Error)]
pub enum TrawlError {
    #[error("work pool has been shut down")]
    PoolShutdown,

    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
