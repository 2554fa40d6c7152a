// ABOUTME: Main library entry point for the newswire listing crawler.
// ABOUTME: Re-exports the public API: Crawler, CrawlConfig, Article, CrawlReport, CrawlError.

//! Newswire listing - crawl aggregator listing pages into article reports.
//!
//! This crate fetches Hacker News style listing pages, parses the story
//! rows into [`Article`] values, and optionally enriches each article with
//! extracted body text through the `newswire-extract` pipeline. The result
//! of a crawl is always a [`CrawlReport`]; network and markup problems
//! degrade into failed or partial reports rather than errors.

pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;

pub use crate::crawler::{
    enrich_articles, CrawlConfig, Crawler, EnrichmentStats, DEFAULT_BASE_URL, HACKERNEWS_SOURCE,
};
pub use crate::error::CrawlError;
pub use crate::models::{Article, CrawlReport};
pub use crate::parser::{parse_listing, resolve_link};
