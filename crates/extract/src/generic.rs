// ABOUTME: Site-independent content extraction over common container selectors.
// ABOUTME: Each candidate is scored by container kind plus text length; best score wins.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::options::Limits;
use crate::text::{char_count, element_text, truncate_at_sentence};

/// Container selectors with their base scores. Every node matched by every
/// selector is scored. Length adds up to 200 points on top of the base, so
/// container kind dominates once articles get reasonably long.
pub const CONTENT_SELECTORS: &[(&str, i32)] = &[
    ("article", 500),
    ("main", 300),
    (".post-content", 400),
    (".entry-content", 400),
    (".content", 200),
    (".markdown-body", 400),
    (".prose", 300),
    ("div[role='main']", 300),
];

static PARSED_SELECTORS: Lazy<Vec<(Selector, &'static str, i32)>> = Lazy::new(|| {
    CONTENT_SELECTORS
        .iter()
        .filter_map(|(css, base)| Selector::parse(css).ok().map(|sel| (sel, *css, *base)))
        .collect()
});

/// A scored extraction candidate.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The selector that produced this candidate.
    pub selector: &'static str,
    /// Cleaned text of the matched container.
    pub text: String,
    /// Base score plus capped length bonus.
    pub score: i32,
}

/// Score every known container in the document and return the best one.
///
/// Candidates shorter than `limits.generic_min_len` are skipped. Ties keep
/// the earliest match in table-then-document order.
pub fn best_candidate<S: AsRef<str>>(
    doc: &Html,
    limits: &Limits,
    noise_tags: &[S],
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (selector, css, base) in PARSED_SELECTORS.iter() {
        for element in doc.select(selector) {
            let text = element_text(&element, noise_tags);
            let len = char_count(&text);
            if len < limits.generic_min_len {
                continue;
            }
            let score = base + (len / 10).min(200) as i32;
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(Candidate {
                    selector: css,
                    text,
                    score,
                });
            }
        }
    }
    best
}

/// Extract the best candidate's text, trimmed to a sentence boundary near
/// the length cap.
pub fn extract<S: AsRef<str>>(doc: &Html, limits: &Limits, noise_tags: &[S]) -> Option<String> {
    let candidate = best_candidate(doc, limits, noise_tags)?;
    Some(truncate_at_sentence(
        &candidate.text,
        limits.generic_max_len,
        limits.sentence_lookback,
    ))
}
