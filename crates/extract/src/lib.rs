// ABOUTME: Main library entry point for the newswire content extraction pipeline.
// ABOUTME: Re-exports the public API: ContentPipeline, PipelineBuilder, Extraction, ExtractReason, FetchError.

//! Newswire extract - best-effort body text extraction for crawled articles.
//!
//! This crate fetches external article pages and recovers their readable body
//! text through a chain of strategies: site-specific rules, a scored generic
//! selector sweep, and a bare-paragraph fallback. Anti-bot challenge pages
//! are detected up front and reported rather than parsed.
//!
//! # Example
//!
//! ```no_run
//! use newswire_extract::ContentPipeline;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pipeline = ContentPipeline::builder().build();
//!     let outcome = pipeline
//!         .extract_content("https://example.com/article")
//!         .await;
//!     if let Some(text) = outcome.text {
//!         println!("{}", text);
//!     }
//! }
//! ```

pub mod detect;
pub mod error;
pub mod fetch;
pub mod generic;
pub mod options;
pub mod pacer;
pub mod paragraphs;
pub mod pipeline;
pub mod sites;
pub mod text;

pub use crate::detect::{BlockDetector, BLOCKED_PLACEHOLDER, DEFAULT_BLOCKED_MARKERS};
pub use crate::error::FetchError;
pub use crate::fetch::{build_client, fetch_page, Page, RetryPolicy, MAX_CONTENT_LENGTH};
pub use crate::options::{Limits, Options, PipelineBuilder, DEFAULT_USER_AGENT};
pub use crate::pacer::Pacer;
pub use crate::pipeline::{ContentPipeline, ExtractReason, Extraction};
pub use crate::sites::{NpmSite, SiteExtractor, SiteRegistry, SiteRule};
