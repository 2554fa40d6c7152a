// ABOUTME: The ContentPipeline orchestrating fetch, anti-bot detection, and extraction strategies.
// ABOUTME: Provides async extract_content() for URLs and sync extract_from_html() for raw HTML.

use std::fmt;

use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::detect::BlockDetector;
use crate::fetch::{build_client, fetch_page, RetryPolicy};
use crate::options::{Options, PipelineBuilder};
use crate::pacer::Pacer;
use crate::sites::SiteRegistry;
use crate::{generic, paragraphs};

/// Why an extraction ended the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractReason {
    /// One of the strategies produced body text.
    Extracted,
    /// An anti-bot challenge page was detected; text is a fixed placeholder.
    Blocked,
    /// The page fetched fine but no strategy found usable content.
    NotFound,
    /// The page could not be fetched at all.
    FetchFailed,
}

impl fmt::Display for ExtractReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtractReason::Extracted => "extracted",
            ExtractReason::Blocked => "blocked",
            ExtractReason::NotFound => "not_found",
            ExtractReason::FetchFailed => "fetch_failed",
        };
        write!(f, "{}", s)
    }
}

/// The outcome of one extraction attempt.
///
/// `text` is Some exactly when there is something worth showing: extracted
/// body text or the blocked placeholder. It is never Some of an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub text: Option<String>,
    pub reason: ExtractReason,
}

impl Extraction {
    pub fn extracted(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            reason: ExtractReason::Extracted,
        }
    }

    pub fn blocked() -> Self {
        Self {
            text: Some(crate::detect::BLOCKED_PLACEHOLDER.to_string()),
            reason: ExtractReason::Blocked,
        }
    }

    pub fn not_found() -> Self {
        Self {
            text: None,
            reason: ExtractReason::NotFound,
        }
    }

    pub fn fetch_failed() -> Self {
        Self {
            text: None,
            reason: ExtractReason::FetchFailed,
        }
    }

    /// Returns true when a strategy produced real body text.
    pub fn is_extracted(&self) -> bool {
        self.reason == ExtractReason::Extracted
    }

    /// Returns true when the page was an anti-bot challenge.
    pub fn is_blocked(&self) -> bool {
        self.reason == ExtractReason::Blocked
    }

    /// Returns true when there is text to show, placeholder included.
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }
}

/// The content extraction pipeline.
///
/// Holds the HTTP client, the site-rule registry, the anti-bot detector, and
/// the request pacer. One instance is meant to be shared across a whole
/// crawl; pacing and cookies only work when callers go through the same
/// pipeline.
pub struct ContentPipeline {
    opts: Options,
    http: reqwest::Client,
    registry: SiteRegistry,
    detector: BlockDetector,
    pacer: Pacer,
    retry: RetryPolicy,
}

impl ContentPipeline {
    /// Create a new PipelineBuilder for configuring the pipeline.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Create a pipeline with the given options and the built-in site rules.
    pub fn new(opts: Options) -> Self {
        Self::with_registry(opts, SiteRegistry::with_defaults())
    }

    /// Create a pipeline with a custom site-rule registry.
    pub fn with_registry(opts: Options, registry: SiteRegistry) -> Self {
        let http = opts
            .http_client
            .clone()
            .unwrap_or_else(|| build_client(&opts.user_agent, opts.timeout, &opts.headers));
        let detector = BlockDetector::new(&opts.blocked_markers);
        let pacer = Pacer::new(opts.request_delay);
        let retry = RetryPolicy {
            max_retries: opts.max_retries,
            backoff: opts.backoff,
        };
        Self {
            opts,
            http,
            registry,
            detector,
            pacer,
            retry,
        }
    }

    /// The options this pipeline was built with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Fetch a URL and extract its body text.
    ///
    /// Waits for the shared pacer before the request goes out. Never errors:
    /// fetch failures and extraction misses are reported through the reason
    /// on the returned Extraction, so one bad article cannot sink a crawl.
    pub async fn extract_content(&self, url: &str) -> Extraction {
        self.pacer.pace().await;

        let page = match fetch_page(&self.http, url, &self.retry).await {
            Ok(page) => page,
            Err(err) => {
                warn!("Fetch failed for {}: {}", url, err);
                return Extraction::fetch_failed();
            }
        };

        let html = page.text();
        self.extract_from_html(&html, url)
    }

    /// Extract body text from already-fetched HTML.
    ///
    /// Strategy order: anti-bot detection, then the site rule for the URL
    /// host, then the generic selector sweep, then the paragraph fallback.
    /// The first strategy that produces text wins.
    pub fn extract_from_html(&self, html: &str, url: &str) -> Extraction {
        let doc = Html::parse_document(html);

        if self.detector.is_blocked(&doc) {
            debug!("Anti-bot challenge detected at {}", url);
            return Extraction::blocked();
        }

        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
            .unwrap_or_default();

        if let Some(rule) = self.registry.lookup(&host) {
            match rule.extract(&doc) {
                Some(text) if !text.is_empty() => {
                    debug!("Site rule {} matched {}", rule.name(), url);
                    return Extraction::extracted(text);
                }
                _ => debug!("Site rule {} missed for {}", rule.name(), url),
            }
        }

        if let Some(text) = generic::extract(&doc, &self.opts.limits, &self.opts.noise_tags) {
            return Extraction::extracted(text);
        }

        if let Some(text) = paragraphs::extract(&doc, &self.opts.limits) {
            return Extraction::extracted(text);
        }

        debug!("No content found at {}", url);
        Extraction::not_found()
    }
}

impl fmt::Debug for ContentPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentPipeline")
            .field("opts", &self.opts)
            .field("registry", &self.registry)
            .finish()
    }
}
