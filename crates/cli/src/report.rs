// ABOUTME: Plain-text report writer for crawl results.
// ABOUTME: Handles dated filenames, retention cleanup, and report listing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::Result;
use chrono::{DateTime, Utc};
use newswire_listing::CrawlReport;
use tracing::{info, warn};

const RULE_WIDTH: usize = 80;
const REPORT_SUFFIX: &str = "_news.txt";

/// Writes crawl reports under a configured output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the report, creating the output directory on demand.
    ///
    /// Failed or empty reports are not written; `Ok(None)` signals that
    /// nothing was saved.
    pub fn save(&self, report: &CrawlReport) -> Result<Option<PathBuf>> {
        if !report.has_articles() {
            warn!(
                "not saving report for {}: crawl failed or returned nothing",
                report.source_name
            );
            return Ok(None);
        }
        fs::create_dir_all(&self.output_dir)?;
        let path = self
            .output_dir
            .join(report_filename(&report.source_name, report.crawl_time));
        fs::write(&path, render(report))?;
        info!("saved {} articles to {}", report.total_count, path.display());
        Ok(Some(path))
    }

    /// Delete reports whose modification time is older than `days` days.
    /// Returns how many files were removed.
    pub fn cleanup_old(&self, days: u64) -> Result<usize> {
        let retention = Duration::from_secs(days.saturating_mul(86_400));
        let Some(cutoff) = SystemTime::now().checked_sub(retention) else {
            return Ok(0);
        };

        let entries = match fs::read_dir(&self.output_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.ends_with(REPORT_SUFFIX) {
                continue;
            }
            if entry.metadata()?.modified()? < cutoff {
                fs::remove_file(entry.path())?;
                info!("removed old report {}", name);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Report paths under the output directory, newest first. With a source
    /// name only that source's reports are returned.
    pub fn list_reports(&self, source: Option<&str>) -> Result<Vec<PathBuf>> {
        let needle = source.map(|name| format!("_{}_", name));
        let entries = match fs::read_dir(&self.output_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut reports = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.ends_with(REPORT_SUFFIX) {
                continue;
            }
            if let Some(ref needle) = needle {
                if !name.contains(needle.as_str()) {
                    continue;
                }
            }
            reports.push((entry.metadata()?.modified()?, entry.path()));
        }
        reports.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(reports.into_iter().map(|(_, path)| path).collect())
    }
}

fn report_filename(source_name: &str, crawl_time: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}{}",
        crawl_time.format("%Y-%m-%d"),
        source_name,
        crawl_time.format("%H%M%S"),
        REPORT_SUFFIX
    )
}

fn render(report: &CrawlReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "News crawl report".to_string(),
        rule.clone(),
        format!("Source: {}", report.source_name),
        format!(
            "Crawled: {}",
            report.crawl_time.format("%Y-%m-%d %H:%M:%S")
        ),
        format!("Articles: {}", report.total_count),
        rule.clone(),
        String::new(),
    ];
    for (i, article) in report.articles.iter().enumerate() {
        lines.push(format!("[Article {}]", i + 1));
        lines.push(article.format_text());
        lines.push(String::new());
    }
    lines.push(rule.clone());
    lines.push("End of report".to_string());
    lines.push(rule);
    lines.join("\n")
}
