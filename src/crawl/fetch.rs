// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fetching pages.
//!
//! The crawler only sees the [`Fetcher`] trait. Production uses
//! [`HttpFetcher`]; tests plug in an in-memory web
//! ([`MemoryWeb`](crate::testing::MemoryWeb)) so crawl behavior can be checked
//! without a network.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use url::Url;

use crate::config::Config;
use crate::error::Result;

pub trait Fetcher: Send + Sync {
    /// Fetch the HTML at `url`.
    ///
    /// - `Ok(Some(html))`: a successful HTML page
    /// - `Ok(None)`: the server answered, but not with HTML worth indexing
    /// - `Err(_)`: the request itself failed
    fn fetch(&self, url: &Url) -> Result<Option<String>>;
}

/// Blocking HTTP fetcher with a bounded redirect count.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(redirects: usize, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::limited(redirects))
            .timeout(timeout)
            .user_agent(concat!("trawl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.redirects, config.fetch_timeout)
    }
}

/// Whether a `Content-Type` header value denotes HTML.
pub fn is_html(content_type: &str) -> bool {
    content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("text/html")
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Option<String>> {
        let response = self.client.get(url.clone()).send()?;

        if response.status() != StatusCode::OK {
            tracing::debug!(%url, status = %response.status(), "skipping non-200 response");
            return Ok(None);
        }

        let html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_html);
        if !html {
            tracing::debug!(%url, "skipping non-HTML response");
            return Ok(None);
        }

        Ok(Some(response.text()?))
    }
}
