// ABOUTME: Configuration for the extraction pipeline: network settings, cleaning knobs, length limits.
// ABOUTME: PipelineBuilder provides a fluent API for constructing ContentPipeline instances.

use std::collections::HashMap;
use std::time::Duration;

use crate::detect::DEFAULT_BLOCKED_MARKERS;
use crate::pipeline::ContentPipeline;
use crate::sites::SiteRegistry;
use crate::text::DEFAULT_NOISE_TAGS;

/// Default User-Agent for article fetches. A desktop browser string; plenty
/// of news sites refuse obviously non-browser agents outright.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Length thresholds and caps used by the extraction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Minimum candidate length for the generic selector sweep (inclusive).
    pub generic_min_len: usize,
    /// Length cap applied to generic extractions.
    pub generic_max_len: usize,
    /// How far back from the cap to look for a sentence boundary.
    pub sentence_lookback: usize,
    /// Paragraph fallback keeps paragraphs strictly longer than this.
    pub fallback_min_paragraph: usize,
    /// Paragraph fallback stops collecting at this total length.
    pub fallback_max_len: usize,
    /// Joined paragraph text must strictly exceed this to count.
    pub fallback_min_total: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            generic_min_len: 100,
            generic_max_len: 2500,
            sentence_lookback: 200,
            fallback_min_paragraph: 20,
            fallback_max_len: 2000,
            fallback_min_total: 100,
        }
    }
}

/// Configuration options for the content pipeline.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub request_delay: Duration,
    pub max_retries: u32,
    pub backoff: Duration,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
    pub blocked_markers: Vec<String>,
    pub noise_tags: Vec<String>,
    pub limits: Limits,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_delay: Duration::from_secs(1),
            max_retries: 3,
            backoff: Duration::from_secs(1),
            headers: HashMap::new(),
            http_client: None,
            blocked_markers: DEFAULT_BLOCKED_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            noise_tags: DEFAULT_NOISE_TAGS.iter().map(|s| s.to_string()).collect(),
            limits: Limits::default(),
        }
    }
}

/// Builder for constructing ContentPipeline instances with custom configuration.
#[derive(Debug)]
pub struct PipelineBuilder {
    opts: Options,
    registry: Option<SiteRegistry>,
}

impl PipelineBuilder {
    /// Create a new PipelineBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
            registry: None,
        }
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the minimum spacing between outgoing requests.
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.opts.request_delay = delay;
        self
    }

    /// Set the number of retries for retryable fetch failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.opts.max_retries = retries;
        self
    }

    /// Set the base backoff between retries. Doubles on each attempt.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.opts.backoff = backoff;
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Replace the anti-bot marker list.
    pub fn blocked_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opts.blocked_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the tag names excluded from extracted text.
    pub fn noise_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opts.noise_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Override the extraction length limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.opts.limits = limits;
        self
    }

    /// Use a custom site-rule registry instead of the built-in rules.
    pub fn registry(mut self, registry: SiteRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the ContentPipeline with the configured options.
    pub fn build(self) -> ContentPipeline {
        match self.registry {
            Some(registry) => ContentPipeline::with_registry(self.opts, registry),
            None => ContentPipeline::new(self.opts),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
