// ABOUTME: Last-resort extraction that harvests bare <p> elements in document order.
// ABOUTME: Short paragraphs are skipped and collection stops at the length budget.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::options::Limits;
use crate::text::{char_count, element_text};

static P_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

const HIDDEN_TAGS: &[&str] = &["script", "style"];

/// Collect paragraph text in document order.
///
/// Paragraphs at or under `limits.fallback_min_paragraph` characters are
/// skipped. Collection stops entirely at the first paragraph that would push
/// the running total past `limits.fallback_max_len`; the budget counts
/// paragraph text only, not the joining spaces. The joined result is returned
/// only when it exceeds `limits.fallback_min_total` characters.
pub fn extract(doc: &Html, limits: &Limits) -> Option<String> {
    let mut kept: Vec<String> = Vec::new();
    let mut total = 0usize;

    for element in doc.select(&P_SELECTOR) {
        let text = element_text(&element, HIDDEN_TAGS);
        let len = char_count(&text);
        if len <= limits.fallback_min_paragraph {
            continue;
        }
        if total + len > limits.fallback_max_len {
            break;
        }
        total += len;
        kept.push(text);
    }

    let joined = kept.join(" ");
    if char_count(&joined) > limits.fallback_min_total {
        Some(joined)
    } else {
        None
    }
}
