// ABOUTME: Anti-bot interstitial detection over the visible text of a page.
// ABOUTME: Scans with a case-insensitive marker automaton built from the configured phrase list.

use aho_corasick::AhoCorasick;
use scraper::Html;

use crate::text::element_text;

/// Marker phrases that identify bot-verification interstitials.
pub const DEFAULT_BLOCKED_MARKERS: &[&str] = &[
    "just a moment",
    "verify",
    "checking your browser",
    "cloudflare",
    "captcha",
];

/// Placeholder recorded when a page sits behind an anti-bot challenge.
pub const BLOCKED_PLACEHOLDER: &str =
    "Content unavailable: the site is protected by an anti-bot challenge.";

/// Tags whose text is never rendered and so never counts as page text.
const HIDDEN_TAGS: &[&str] = &["script", "style"];

/// Classifies documents as blocked or normal.
///
/// The scan covers visible text only. Interstitial vendors tend to name
/// themselves in embedded scripts on perfectly normal pages, so script and
/// style subtrees are excluded to keep false positives out.
#[derive(Debug)]
pub struct BlockDetector {
    markers: AhoCorasick,
}

impl BlockDetector {
    /// Build a detector for the given marker phrases, matched
    /// case-insensitively. An empty list never matches anything.
    pub fn new<S: AsRef<str>>(markers: &[S]) -> Self {
        let markers = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(markers.iter().map(|m| m.as_ref()))
            .expect("marker automaton build");
        Self { markers }
    }

    /// True when any marker phrase occurs in the document's visible text.
    pub fn is_blocked(&self, doc: &Html) -> bool {
        let text = element_text(&doc.root_element(), HIDDEN_TAGS);
        self.markers.is_match(&text)
    }
}

impl Default for BlockDetector {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_MARKERS)
    }
}
