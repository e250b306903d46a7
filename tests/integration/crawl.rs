//! Crawling an in-memory web through the pool.

use super::common::{assert_counts_consistent, html_page, MemoryWeb};
use std::sync::Arc;
use std::time::Duration;
use trawl::{ConcurrentIndex, CrawlReport, Crawler, Fetcher, TrawlError, WorkPool};
use url::Url;

fn crawl(
    web: MemoryWeb,
    seed: &str,
    cap: usize,
    threads: usize,
) -> (Arc<MemoryWeb>, ConcurrentIndex, CrawlReport) {
    let web = Arc::new(web);
    let index = Arc::new(ConcurrentIndex::new());
    let pool = Arc::new(WorkPool::new(threads));

    let fetcher = SharedWeb(Arc::clone(&web));
    let crawler = Crawler::new(Arc::clone(&index), Arc::clone(&pool), fetcher);
    let report = crawler.crawl(&Url::parse(seed).unwrap(), cap);
    pool.join_all();
    drop(crawler);

    let index = Arc::try_unwrap(index).expect("crawler released the index");
    (web, index, report)
}

/// Lets a test keep its own handle on the web to inspect fetch counts.
struct SharedWeb(Arc<MemoryWeb>);

impl Fetcher for SharedWeb {
    fn fetch(&self, url: &Url) -> trawl::Result<Option<String>> {
        self.0.fetch(url)
    }
}

/// `n` pages that all link to each other.
fn clique(n: usize) -> MemoryWeb {
    let urls: Vec<String> = (0..n).map(|i| format!("https://web.test/p{i}")).collect();
    let links: Vec<&str> = urls.iter().map(String::as_str).collect();
    urls.iter().fold(MemoryWeb::new(), |web, url| {
        web.page(url, &html_page("page about crawling", &links))
    })
}

// ============================================================================
// BOUNDS
// ============================================================================

#[test]
fn test_cap_bounds_enqueued_locations() {
    let (web, index, report) = crawl(clique(10), "https://web.test/p0", 4, 4);

    assert_eq!(report.enqueued, 4);
    assert_eq!(report.indexed, 4);
    assert_eq!(web.distinct_fetches(), 4);
    assert_eq!(index.counts().len(), 4);
}

#[test]
fn test_cap_of_one_fetches_only_the_seed() {
    let (web, index, report) = crawl(clique(5), "https://web.test/p0", 1, 2);

    assert_eq!(report, CrawlReport { enqueued: 1, indexed: 1, skipped: 0, failed: 0 });
    assert_eq!(web.fetch_count("https://web.test/p0"), 1);
    assert!(index.has_count("https://web.test/p0"));
}

#[test]
fn test_no_location_fetched_twice() {
    let web = clique(8).with_delay(Duration::from_millis(5));
    let (web, index, report) = crawl(web, "https://web.test/p3", 100, 4);

    assert_eq!(report.enqueued, 8);
    assert_eq!(report.indexed, 8);
    assert_eq!(web.max_fetches_per_url(), 1);
    assert_counts_consistent(&index.snapshot());
}

// ============================================================================
// CONTENT
// ============================================================================

#[test]
fn test_page_text_is_indexed_without_markup() {
    let html = "<html><head><title>Secret</title><style>p { color: red }</style></head>\
                <body><!-- hidden --><p>Running &amp; jumping</p>\
                <script>var ignored = 1;</script></body></html>";
    let web = MemoryWeb::new().page("https://web.test/", html);
    let (_, index, _) = crawl(web, "https://web.test/", 1, 1);

    let location = "https://web.test/";
    assert_eq!(index.word_count(location), 2);
    assert_eq!(index.positions("run", location).into_iter().collect::<Vec<_>>(), vec![1]);
    assert!(index.has_position("jump", location, 2));
    assert!(!index.has_term("secret"));
    assert!(!index.has_term("ignor"));
}

#[test]
fn test_fragments_and_relative_links_are_canonical() {
    let web = MemoryWeb::new()
        .page(
            "https://web.test/docs/",
            &html_page("start", &["intro#top", "intro#bottom", "/docs/intro", "mailto:x@web.test"]),
        )
        .page("https://web.test/docs/intro", &html_page("intro", &[]));
    let (web, index, report) = crawl(web, "https://web.test/docs/#main", 10, 3);

    assert_eq!(report.enqueued, 2);
    assert_eq!(web.fetch_count("https://web.test/docs/intro"), 1);
    assert!(index.has_count("https://web.test/docs/"));
    assert!(index.has_location("intro", "https://web.test/docs/intro"));
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_broken_seed_leaves_index_empty() {
    let web = MemoryWeb::new().broken("https://down.test/");
    let (_, index, report) = crawl(web, "https://down.test/", 5, 2);

    assert!(index.is_empty());
    assert_eq!(report.failed, 1);
    assert_eq!(report.indexed, 0);
}

#[test]
fn test_non_html_is_skipped_and_crawl_continues() {
    let web = MemoryWeb::new()
        .page("https://web.test/", &html_page("home", &["/logo.png", "/about"]))
        .non_html("https://web.test/logo.png")
        .page("https://web.test/about", &html_page("about us", &["/missing"]));
    let (_, index, report) = crawl(web, "https://web.test/", 10, 2);

    assert_eq!(report, CrawlReport { enqueued: 4, indexed: 2, skipped: 1, failed: 1 });
    assert!(!index.has_count("https://web.test/logo.png"));
    assert!(index.has_count("https://web.test/about"));
}

#[test]
fn test_invalid_seed_is_an_error() {
    let index = Arc::new(ConcurrentIndex::new());
    let pool = Arc::new(WorkPool::new(1));
    let crawler = Crawler::new(index, Arc::clone(&pool), MemoryWeb::new());

    let err = crawler.crawl_str("not a url", 3).unwrap_err();
    assert!(matches!(err, TrawlError::InvalidUrl { .. }));
    pool.join_all();
}
