// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Markup stripping and link extraction.
//!
//! Regex-based on purpose: crawled pages are only ever tokenized, never
//! rendered, so "good enough to find the words and the links" is the bar.
//! Unparseable markup degrades to fewer words, never to an error.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z0-9]+);").unwrap());

static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Elements removed together with everything inside them.
const BLOCK_ELEMENTS: &[&str] = &["head", "style", "script", "noscript", "iframe", "svg"];

/// One regex per block element. The `regex` crate has no backreferences, so
/// the closing tag is baked into each pattern.
static BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BLOCK_ELEMENTS
        .iter()
        .map(|name| {
            let name = regex::escape(name);
            Regex::new(&format!(r"(?is)<{name}(\s[^>]*?)?>.*?</{name}\s*>")).unwrap()
        })
        .collect()
});

/// Remove comments and the block elements whose text is never page content.
pub fn strip_block_elements(html: &str) -> String {
    let mut text = COMMENT.replace_all(html, "").into_owned();
    for block in BLOCKS.iter() {
        text = block.replace_all(&text, "").into_owned();
    }
    text
}

/// Remove every remaining tag.
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Decode numeric and common named entities; drop the rest.
pub fn strip_entities(html: &str) -> String {
    ENTITY
        .replace_all(html, |caps: &Captures<'_>| decode_entity(&caps[1]).unwrap_or_default())
        .into_owned()
}

fn decode_entity(body: &str) -> Option<String> {
    let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)?
    } else if let Some(dec) = body.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)?
    } else {
        match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => ' ',
            _ => return None,
        }
    };
    Some(decoded.to_string())
}

/// Page text with all markup removed.
pub fn strip_html(html: &str) -> String {
    let text = strip_block_elements(html);
    let text = strip_tags(&text);
    strip_entities(&text)
}

/// A URL as used for a Location: fragment removed.
pub fn canonical_location(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_fragment(None);
    url
}

/// Outbound `http`/`https` links of a page, resolved against `base`.
///
/// Fragments are removed and duplicates dropped, keeping first-seen order.
pub fn list_links(base: &Url, html: &str) -> Vec<Url> {
    let html = COMMENT.replace_all(html, "");
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for caps in ANCHOR_HREF.captures_iter(&html) {
        let Some(href) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        let href = strip_entities(href.as_str().trim());
        let Ok(resolved) = base.join(&href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        let resolved = canonical_location(&resolved);
        if seen.insert(resolved.clone()) {
            links.push(resolved);
        }
    }

    links
}
