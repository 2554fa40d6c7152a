// ABOUTME: Data models for crawled articles and crawl reports.
// ABOUTME: Article::format_text renders the plain-text block used in saved reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single article pulled from a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: Option<String>,
    pub url: String,
    pub source_name: String,
    pub score: u32,
    pub comments_count: u32,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl Article {
    /// Create an article with the required fields; everything else starts
    /// at its default.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: None,
            url: url.into(),
            source_name: source_name.into(),
            score: 0,
            comments_count: 0,
            created_at: Utc::now(),
            tags: Vec::new(),
        }
    }

    /// Render the labeled plain-text block for this article.
    ///
    /// Content and Tags lines only appear when there is something to show;
    /// the block always ends with an 80-dash rule.
    pub fn format_text(&self) -> String {
        let mut lines = vec![
            format!("Title: {}", self.title),
            format!("Link: {}", self.url),
            format!("Source: {}", self.source_name),
            format!("Score: {}", self.score),
            format!("Comments: {}", self.comments_count),
            format!("Time: {}", self.created_at.format("%Y-%m-%d %H:%M:%S")),
        ];
        if let Some(ref content) = self.content {
            if !content.is_empty() {
                lines.push(format!("Content: {}", content));
            }
        }
        if !self.tags.is_empty() {
            lines.push(format!("Tags: {}", self.tags.join(", ")));
        }
        lines.push("-".repeat(80));
        lines.join("\n")
    }
}

/// The outcome of one crawl run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlReport {
    pub articles: Vec<Article>,
    pub total_count: usize,
    pub source_name: String,
    pub crawl_time: DateTime<Utc>,
    pub success: bool,
    pub error_message: Option<String>,
}

impl CrawlReport {
    /// A successful report over the collected articles.
    pub fn success(source_name: impl Into<String>, articles: Vec<Article>) -> Self {
        Self {
            total_count: articles.len(),
            articles,
            source_name: source_name.into(),
            crawl_time: Utc::now(),
            success: true,
            error_message: None,
        }
    }

    /// A failed report carrying the error message.
    pub fn failure(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            articles: Vec::new(),
            total_count: 0,
            source_name: source_name.into(),
            crawl_time: Utc::now(),
            success: false,
            error_message: Some(message.into()),
        }
    }

    /// Returns true when the crawl succeeded and produced articles.
    pub fn has_articles(&self) -> bool {
        self.success && !self.articles.is_empty()
    }
}
