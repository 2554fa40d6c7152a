// ABOUTME: Error types for listing crawl operations.
// ABOUTME: Provides CrawlError with Fetch and Config variants.

use thiserror::Error;

use newswire_extract::FetchError;

/// Errors that can occur while crawling a listing source.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The listing page could not be fetched.
    #[error("failed to fetch listing: {0}")]
    Fetch(#[from] FetchError),

    /// The crawler configuration is out of range.
    #[error("invalid crawler config: {0}")]
    Config(String),
}

impl CrawlError {
    /// Creates a Config error with a custom message.
    pub fn config(msg: impl Into<String>) -> Self {
        CrawlError::Config(msg.into())
    }
}
