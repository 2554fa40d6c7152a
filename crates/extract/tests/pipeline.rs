// ABOUTME: End-to-end tests for the extraction pipeline over a local mock server.
// ABOUTME: Covers every outcome reason plus charset handling and pipeline reuse across tasks.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use newswire_extract::{
    ContentPipeline, ExtractReason, SiteRegistry, SiteRule, BLOCKED_PLACEHOLDER,
};

fn quiet_pipeline() -> ContentPipeline {
    ContentPipeline::builder()
        .request_delay(Duration::ZERO)
        .max_retries(0)
        .build()
}

#[tokio::test]
async fn test_article_with_nav_sibling() {
    let server = MockServer::start();
    let body_text = "word ".repeat(120).trim_end().to_string();
    let page = format!(
        "<html><body><nav>Home   About\n  Subscribe</nav><article>  {}\n\n</article></body></html>",
        body_text
    );
    server.mock(|when, then| {
        when.method(GET).path("/story");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(page);
    });

    let out = quiet_pipeline().extract_content(&server.url("/story")).await;

    assert_eq!(out.reason, ExtractReason::Extracted);
    let text = out.text.expect("should have text");
    assert_eq!(text, body_text);
    assert!(!text.contains("Subscribe"));
    assert!(!text.contains("  "), "whitespace should be collapsed");
}

#[tokio::test]
async fn test_challenge_page_is_reported_blocked() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/guarded");
        then.status(200)
            .header("content-type", "text/html")
            .body(
                "<html><head><title>Just a moment...</title></head>\
                 <body><p>Checking your browser before accessing example.com</p>\
                 <p>DDoS protection by Cloudflare</p></body></html>",
            );
    });

    let out = quiet_pipeline()
        .extract_content(&server.url("/guarded"))
        .await;

    assert_eq!(out.reason, ExtractReason::Blocked);
    assert_eq!(out.text.as_deref(), Some(BLOCKED_PLACEHOLDER));
}

#[tokio::test]
async fn test_site_rule_applies_over_the_wire() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/readme");
        then.status(200)
            .header("content-type", "text/html")
            .body(format!(
                "<html><body><article class=\"markdown-body\">{}</article></body></html>",
                "a".repeat(2100)
            ));
    });

    // the mock server is reached by IP, so register a rule for that host
    let mut registry = SiteRegistry::new();
    registry.register(Box::new(SiteRule::new(
        "local",
        &["127.0.0.1"],
        &[("article.markdown-body", 2000)],
    )));
    let pipeline = ContentPipeline::builder()
        .request_delay(Duration::ZERO)
        .max_retries(0)
        .registry(registry)
        .build();

    let out = pipeline.extract_content(&server.url("/readme")).await;

    assert_eq!(out.reason, ExtractReason::Extracted);
    let text = out.text.unwrap();
    assert_eq!(text.chars().count(), 2003);
    assert!(text.ends_with("..."));
}

#[tokio::test]
async fn test_fetch_failure_does_not_poison_the_pipeline() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/down");
        then.status(500).body("oops");
    });
    server.mock(|when, then| {
        when.method(GET).path("/up");
        then.status(200)
            .header("content-type", "text/html")
            .body(format!(
                "<html><body><article>{}</article></body></html>",
                "word ".repeat(100)
            ));
    });

    let pipeline = quiet_pipeline();

    let failed = pipeline.extract_content(&server.url("/down")).await;
    assert_eq!(failed.reason, ExtractReason::FetchFailed);
    assert!(failed.text.is_none());

    let ok = pipeline.extract_content(&server.url("/up")).await;
    assert_eq!(ok.reason, ExtractReason::Extracted);
}

#[tokio::test]
async fn test_thin_page_reports_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/thin");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><body><p>Too thin.</p></body></html>");
    });

    let out = quiet_pipeline().extract_content(&server.url("/thin")).await;

    assert_eq!(out.reason, ExtractReason::NotFound);
    assert!(out.text.is_none());
}

#[tokio::test]
async fn test_legacy_charset_is_decoded() {
    let server = MockServer::start();
    let mut body: Vec<u8> = Vec::new();
    body.extend_from_slice(b"<html><body><article>");
    for _ in 0..150 {
        // "café " in ISO-8859-1
        body.extend_from_slice(&[0x63, 0x61, 0x66, 0xe9, 0x20]);
    }
    body.extend_from_slice(b"</article></body></html>");
    server.mock(|when, then| {
        when.method(GET).path("/legacy");
        then.status(200)
            .header("content-type", "text/html; charset=iso-8859-1")
            .body(body);
    });

    let out = quiet_pipeline()
        .extract_content(&server.url("/legacy"))
        .await;

    assert_eq!(out.reason, ExtractReason::Extracted);
    assert!(out.text.unwrap().contains("café"));
}

#[tokio::test]
async fn test_paragraph_only_page() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/plain");
        then.status(200)
            .header("content-type", "text/html")
            .body(format!(
                "<html><body><div><p>{}</p><p>{}</p></div></body></html>",
                "first paragraph text that is long enough to keep around here",
                "second paragraph text that is also long enough to keep around"
            ));
    });

    let out = quiet_pipeline().extract_content(&server.url("/plain")).await;

    assert_eq!(out.reason, ExtractReason::Extracted);
    let text = out.text.unwrap();
    assert!(text.starts_with("first paragraph"));
    assert!(text.contains("second paragraph"));
}

#[tokio::test]
async fn test_pipeline_is_shareable_across_tasks() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/a");
        then.status(200)
            .header("content-type", "text/html")
            .body(format!(
                "<html><body><article>{}</article></body></html>",
                "alpha ".repeat(100)
            ));
    });
    server.mock(|when, then| {
        when.method(GET).path("/b");
        then.status(200)
            .header("content-type", "text/html")
            .body(format!(
                "<html><body><article>{}</article></body></html>",
                "bravo ".repeat(100)
            ));
    });

    let pipeline = Arc::new(quiet_pipeline());
    let a = {
        let pipeline = Arc::clone(&pipeline);
        let url = server.url("/a");
        tokio::spawn(async move { pipeline.extract_content(&url).await })
    };
    let b = {
        let pipeline = Arc::clone(&pipeline);
        let url = server.url("/b");
        tokio::spawn(async move { pipeline.extract_content(&url).await })
    };

    let (a, b) = (a.await.unwrap(), b.await.unwrap());
    assert!(a.is_extracted());
    assert!(b.is_extracted());
    assert!(a.text.unwrap().starts_with("alpha"));
    assert!(b.text.unwrap().starts_with("bravo"));
}
