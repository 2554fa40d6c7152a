// ABOUTME: Parser for Hacker News style listing pages.
// ABOUTME: Walks tr.athing rows, pulling title, link, score, and comment count per article.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::models::Article;

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.athing").unwrap());
static TITLELINE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.titleline").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static SUBTEXT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td.subtext").unwrap());
static SCORE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("span.score").unwrap());
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Parse a listing page into articles.
///
/// Rows missing an id, a titleline, or a link are skipped with a warning; a
/// malformed row never aborts the rest of the page.
pub fn parse_listing(html: &str, base_url: &str, source_name: &str) -> Vec<Article> {
    let doc = Html::parse_document(html);
    let mut articles = Vec::new();

    for row in doc.select(&ROW_SELECTOR) {
        let id = match row.value().attr("id") {
            Some(id) => id,
            None => {
                warn!("Skipping listing row without an id attribute");
                continue;
            }
        };
        match parse_row(&row, base_url, source_name) {
            Some(article) => articles.push(article),
            None => warn!("Skipping malformed listing row {}", id),
        }
    }

    articles
}

fn parse_row(row: &ElementRef, base_url: &str, source_name: &str) -> Option<Article> {
    let titleline = row.select(&TITLELINE_SELECTOR).next()?;
    let link = titleline.select(&LINK_SELECTOR).next()?;

    let title = link.text().collect::<String>().trim().to_string();
    if title.is_empty() {
        return None;
    }
    let href = link.value().attr("href")?;

    let mut article = Article::new(title, resolve_link(base_url, href), source_name);
    if let Some(subtext) = metadata_cell(row) {
        article.score = subtext
            .select(&SCORE_SELECTOR)
            .next()
            .map(|el| first_number(&el.text().collect::<String>()))
            .unwrap_or(0);
        article.comments_count = comment_count(&subtext);
    }
    Some(article)
}

/// The td.subtext cell lives in the next element row after the athing row.
fn metadata_cell<'a>(row: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    let meta_row = row.next_siblings().find_map(ElementRef::wrap)?;
    meta_row.select(&SUBTEXT_SELECTOR).next()
}

/// Comment counts come from the first item link whose text mentions comments.
/// Fresh stories carry a "discuss" link instead and count as zero.
fn comment_count(subtext: &ElementRef) -> u32 {
    for link in subtext.select(&LINK_SELECTOR) {
        let href = link.value().attr("href").unwrap_or("");
        if !href.contains("item?id=") {
            continue;
        }
        let text = link.text().collect::<String>();
        if text.to_lowercase().contains("comment") {
            return first_number(&text);
        }
    }
    0
}

/// The first run of digits in the text, or zero.
fn first_number(text: &str) -> u32 {
    DIGITS
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Resolve a listing href against the site base URL.
///
/// Discussion links come through as `item?id=...` and need a separating
/// slash; absolute paths are joined bare; full URLs pass through unchanged.
pub fn resolve_link(base_url: &str, href: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if href.starts_with("item?id=") {
        format!("{}/{}", base, href)
    } else if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        href.to_string()
    }
}
