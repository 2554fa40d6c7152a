// ABOUTME: End-to-end crawl tests against a mock listing site.
// ABOUTME: Covers paging, failure degradation, content enrichment, and outcome counting.

use std::time::Duration;

use httpmock::prelude::*;
use newswire_extract::{ContentPipeline, BLOCKED_PLACEHOLDER};
use newswire_listing::{enrich_articles, Article, CrawlConfig, Crawler};

/// A minimal listing page with one story row per (id, title, href) entry.
fn listing_html(entries: &[(u32, &str, &str)]) -> String {
    let mut rows = String::new();
    for (id, title, href) in entries {
        rows.push_str(&format!(
            "<tr class='athing' id='{}'>\
             <td class=\"title\"><span class=\"titleline\"><a href=\"{}\">{}</a></span></td>\
             </tr>\
             <tr><td class=\"subtext\">\
             <span class=\"score\" id=\"score_{}\">10 points</span> \
             <a href=\"item?id={}\">3&nbsp;comments</a>\
             </td></tr>",
            id, href, title, id, id
        ));
    }
    format!("<html><body><table>{}</table></body></html>", rows)
}

fn article_html(marker: &str) -> String {
    format!(
        "<html><body><article>{}</article></body></html>",
        format!("{} ", marker).repeat(100)
    )
}

fn quiet_pipeline() -> ContentPipeline {
    ContentPipeline::builder()
        .request_delay(Duration::ZERO)
        .max_retries(0)
        .build()
}

fn quiet_config(server: &MockServer, max_pages: u32, fetch_content: bool) -> CrawlConfig {
    CrawlConfig {
        base_url: server.base_url(),
        max_pages,
        delay: Duration::ZERO,
        fetch_content,
        timeout: Duration::from_secs(5),
        max_retries: 0,
        backoff: Duration::ZERO,
    }
}

#[tokio::test]
async fn test_two_page_crawl_with_enrichment() {
    let server = MockServer::start();

    let page2 = server.mock(|when, then| {
        when.method(GET).path("/news").query_param("p", "2");
        then.status(200)
            .header("content-type", "text/html")
            .body(listing_html(&[(2, "Second story", &server.url("/post2"))]));
    });
    let page1 = server.mock(|when, then| {
        when.method(GET).path("/news").query_param_missing("p");
        then.status(200)
            .header("content-type", "text/html")
            .body(listing_html(&[(1, "First story", &server.url("/post1"))]));
    });
    let post1 = server.mock(|when, then| {
        when.method(GET).path("/post1");
        then.status(200)
            .header("content-type", "text/html")
            .body(article_html("alpha"));
    });
    let post2 = server.mock(|when, then| {
        when.method(GET).path("/post2");
        then.status(200)
            .header("content-type", "text/html")
            .body(article_html("bravo"));
    });

    let crawler = Crawler::new(quiet_config(&server, 2, true)).unwrap();
    let report = crawler.crawl().await;

    page1.assert_hits(1);
    page2.assert_hits(1);
    post1.assert_hits(1);
    post2.assert_hits(1);

    assert!(report.success);
    assert_eq!(report.total_count, 2);
    assert_eq!(report.source_name, "hackernews");
    assert_eq!(report.articles[0].title, "First story");
    assert_eq!(report.articles[1].title, "Second story");
    assert_eq!(report.articles[0].score, 10);
    assert_eq!(report.articles[0].comments_count, 3);
    assert!(report.articles[0]
        .content
        .as_deref()
        .unwrap()
        .starts_with("alpha"));
    assert!(report.articles[1]
        .content
        .as_deref()
        .unwrap()
        .starts_with("bravo"));
}

#[tokio::test]
async fn test_first_page_failure_gives_failed_report() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(500).body("listing down");
    });

    let crawler = Crawler::new(quiet_config(&server, 1, false)).unwrap();
    let report = crawler.crawl().await;

    assert!(!report.success);
    assert_eq!(report.total_count, 0);
    assert!(report.articles.is_empty());
    let message = report.error_message.unwrap();
    assert!(message.contains("failed to fetch listing"));
    assert!(message.contains("500"));
}

#[tokio::test]
async fn test_transient_listing_failure_is_retried() {
    let server = MockServer::start();
    let listing = server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(503).body("over capacity");
    });

    let config = CrawlConfig {
        max_retries: 3,
        ..quiet_config(&server, 1, false)
    };
    let crawler = Crawler::new(config).unwrap();
    let report = crawler.crawl().await;

    // one initial attempt plus three retries, then the report fails
    listing.assert_hits(4);
    assert!(!report.success);
}

#[tokio::test]
async fn test_later_page_failure_keeps_collected_articles() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/news").query_param("p", "2");
        then.status(500).body("page two down");
    });
    server.mock(|when, then| {
        when.method(GET).path("/news").query_param_missing("p");
        then.status(200)
            .header("content-type", "text/html")
            .body(listing_html(&[(1, "Only story", "https://example.com/a")]));
    });
    // page 3 never gets requested; paging stops at the first failure
    let page3 = server.mock(|when, then| {
        when.method(GET).path("/news").query_param("p", "3");
        then.status(200).body("unused");
    });

    let crawler = Crawler::new(quiet_config(&server, 3, false)).unwrap();
    let report = crawler.crawl().await;

    page3.assert_hits(0);
    assert!(report.success);
    assert_eq!(report.total_count, 1);
    assert_eq!(report.articles[0].title, "Only story");
}

#[tokio::test]
async fn test_fetch_content_disabled_skips_article_fetches() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(200)
            .header("content-type", "text/html")
            .body(listing_html(&[(1, "Story", &server.url("/post1"))]));
    });
    let post1 = server.mock(|when, then| {
        when.method(GET).path("/post1");
        then.status(200).body(article_html("alpha"));
    });

    let crawler = Crawler::new(quiet_config(&server, 1, false)).unwrap();
    let report = crawler.crawl().await;

    post1.assert_hits(0);
    assert!(report.success);
    assert!(report.articles[0].content.is_none());
}

#[tokio::test]
async fn test_pipeline_override_enables_enrichment() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(200)
            .header("content-type", "text/html")
            .body(listing_html(&[(1, "Story", &server.url("/post1"))]));
    });
    let post1 = server.mock(|when, then| {
        when.method(GET).path("/post1");
        then.status(200)
            .header("content-type", "text/html")
            .body(article_html("alpha"));
    });

    // fetch_content is off, but an explicit pipeline turns enrichment on
    let crawler = Crawler::new(quiet_config(&server, 1, false))
        .unwrap()
        .with_pipeline(quiet_pipeline());
    let report = crawler.crawl().await;

    post1.assert_hits(1);
    assert!(report.success);
    assert!(report.articles[0].content.as_deref().unwrap().starts_with("alpha"));
}

#[tokio::test]
async fn test_enrichment_counts_every_outcome() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/ok");
        then.status(200)
            .header("content-type", "text/html")
            .body(article_html("clean"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/challenge");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><head><title>Just a moment...</title></head><body>cloudflare</body></html>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/thin");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><body><p>nope</p></body></html>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404).body("gone");
    });

    let mut articles = vec![
        Article::new("ok", server.url("/ok"), "hackernews"),
        Article::new("challenge", server.url("/challenge"), "hackernews"),
        Article::new("thin", server.url("/thin"), "hackernews"),
        Article::new("missing", server.url("/missing"), "hackernews"),
    ];

    let pipeline = quiet_pipeline();
    let stats = enrich_articles(&pipeline, &mut articles).await;

    assert_eq!(stats.extracted, 1);
    assert_eq!(stats.blocked, 1);
    assert_eq!(stats.not_found, 1);
    assert_eq!(stats.fetch_failed, 1);
    assert_eq!(stats.total(), 4);

    assert!(articles[0].content.as_deref().unwrap().starts_with("clean"));
    assert_eq!(articles[1].content.as_deref(), Some(BLOCKED_PLACEHOLDER));
    assert!(articles[2].content.is_none());
    assert!(articles[3].content.is_none());
}
