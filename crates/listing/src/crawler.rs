// ABOUTME: The Hacker News listing crawler: paged listing fetches, row parsing, content enrichment.
// ABOUTME: Always returns a CrawlReport; listing failures degrade instead of panicking.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info, warn};

use newswire_extract::{
    build_client, fetch_page, ContentPipeline, ExtractReason, Pacer, Page, RetryPolicy,
    DEFAULT_USER_AGENT,
};

use crate::error::CrawlError;
use crate::models::{Article, CrawlReport};
use crate::parser::parse_listing;

/// Source name recorded on articles and reports.
pub const HACKERNEWS_SOURCE: &str = "hackernews";

/// Default listing site.
pub const DEFAULT_BASE_URL: &str = "https://news.ycombinator.com";

/// Crawler configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlConfig {
    pub base_url: String,
    pub max_pages: u32,
    pub delay: Duration,
    pub fetch_content: bool,
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_pages: 1,
            delay: Duration::from_secs(1),
            fetch_content: true,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl CrawlConfig {
    /// Check the configuration is within accepted ranges.
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.max_pages < 1 {
            return Err(CrawlError::config("max_pages must be at least 1"));
        }
        if self.timeout < Duration::from_secs(1) {
            return Err(CrawlError::config("timeout must be at least 1 second"));
        }
        if self.base_url.is_empty() {
            return Err(CrawlError::config("base_url must not be empty"));
        }
        Ok(())
    }
}

/// Outcome counters for the content enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub extracted: usize,
    pub blocked: usize,
    pub not_found: usize,
    pub fetch_failed: usize,
}

impl EnrichmentStats {
    pub fn record(&mut self, reason: ExtractReason) {
        match reason {
            ExtractReason::Extracted => self.extracted += 1,
            ExtractReason::Blocked => self.blocked += 1,
            ExtractReason::NotFound => self.not_found += 1,
            ExtractReason::FetchFailed => self.fetch_failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.extracted + self.blocked + self.not_found + self.fetch_failed
    }
}

/// Fetch and attach body text for each article, counting outcomes.
///
/// Articles keep `content: None` when extraction produced nothing; the
/// pipeline's pacing applies between article fetches.
pub async fn enrich_articles(
    pipeline: &ContentPipeline,
    articles: &mut [Article],
) -> EnrichmentStats {
    let mut stats = EnrichmentStats::default();
    for article in articles.iter_mut() {
        let outcome = pipeline.extract_content(&article.url).await;
        stats.record(outcome.reason);
        if outcome.text.is_none() {
            debug!("No content for {} ({})", article.url, outcome.reason);
        }
        article.content = outcome.text;
    }
    stats
}

/// The Hacker News crawler.
///
/// Fetches listing pages with the crawl timeout, spacing, and retry budget,
/// parses rows into articles, and optionally enriches each article with
/// extracted body text through a ContentPipeline.
pub struct Crawler {
    config: CrawlConfig,
    http: reqwest::Client,
    pacer: Pacer,
    retry: RetryPolicy,
    pipeline: Option<ContentPipeline>,
}

impl Crawler {
    /// Create a crawler after validating the configuration.
    ///
    /// The enrichment pipeline, when enabled, inherits the crawl delay and
    /// retry budget; article fetches keep the pipeline's shorter timeout.
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        config.validate()?;
        let http = build_client(DEFAULT_USER_AGENT, config.timeout, &HashMap::new());
        let pacer = Pacer::new(config.delay);
        let retry = RetryPolicy {
            max_retries: config.max_retries,
            backoff: config.backoff,
        };
        let pipeline = if config.fetch_content {
            Some(
                ContentPipeline::builder()
                    .request_delay(config.delay)
                    .max_retries(config.max_retries)
                    .backoff(config.backoff)
                    .build(),
            )
        } else {
            None
        };
        Ok(Self {
            config,
            http,
            pacer,
            retry,
            pipeline,
        })
    }

    /// Replace the extraction pipeline used for content enrichment.
    pub fn with_pipeline(mut self, pipeline: ContentPipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// The configuration this crawler was built with.
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Run the crawl and return the report.
    ///
    /// A first-page listing failure yields a failed report; a later-page
    /// failure stops paging and keeps what was collected.
    pub async fn crawl(&self) -> CrawlReport {
        info!(
            "Starting {} crawl ({} page{})",
            HACKERNEWS_SOURCE,
            self.config.max_pages,
            if self.config.max_pages == 1 { "" } else { "s" }
        );

        let mut articles = Vec::new();
        for page in 1..=self.config.max_pages {
            let listing = match self.fetch_listing(page).await {
                Ok(listing) => listing,
                Err(err) if page == 1 => {
                    warn!("Listing fetch failed: {}", err);
                    return CrawlReport::failure(HACKERNEWS_SOURCE, err.to_string());
                }
                Err(err) => {
                    warn!("Stopping at page {}: {}", page, err);
                    break;
                }
            };

            let parsed = parse_listing(&listing.text(), &self.config.base_url, HACKERNEWS_SOURCE);
            debug!("Page {} yielded {} articles", page, parsed.len());
            articles.extend(parsed);
        }

        if let Some(ref pipeline) = self.pipeline {
            let stats = enrich_articles(pipeline, &mut articles).await;
            info!(
                "Enriched {} articles: {} extracted, {} blocked, {} not found, {} fetch failed",
                stats.total(),
                stats.extracted,
                stats.blocked,
                stats.not_found,
                stats.fetch_failed
            );
        }

        info!("Crawl finished with {} articles", articles.len());
        CrawlReport::success(HACKERNEWS_SOURCE, articles)
    }

    /// Fetch one listing page, pacing first. Exhausted retries surface as
    /// [`CrawlError::Fetch`].
    async fn fetch_listing(&self, page: u32) -> Result<Page, CrawlError> {
        self.pacer.pace().await;
        let url = self.page_url(page);
        let listing = fetch_page(&self.http, &url, &self.retry).await?;
        Ok(listing)
    }

    /// Listing URL for a page number; page 1 is the bare /news path.
    fn page_url(&self, page: u32) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if page <= 1 {
            format!("{}/news", base)
        } else {
            format!("{}/news?p={}", base, page)
        }
    }
}
