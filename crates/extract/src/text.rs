// ABOUTME: Text utilities shared by the extraction strategies.
// ABOUTME: Noise-skipping DOM text collection, whitespace collapsing, and char-safe truncation.

use scraper::ElementRef;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Tags whose text never counts as article body.
pub const DEFAULT_NOISE_TAGS: &[&str] = &["nav", "header", "footer", "aside", "script", "style"];

/// Collapses whitespace runs into single spaces and trims the ends.
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(c);
            last_was_space = false;
        }
    }

    result.trim().to_string()
}

/// Extracts the text of an element with single-space joining between text
/// nodes, skipping any subtree rooted at a tag in `noise_tags`.
///
/// The returned text is already whitespace-collapsed, so length checks and
/// truncation can operate on it directly.
pub fn element_text<S: AsRef<str>>(element: &ElementRef, noise_tags: &[S]) -> String {
    let mut out = String::new();
    for child in element.children() {
        collect_text(child, noise_tags, &mut out);
    }
    collapse_whitespace(&out)
}

fn collect_text<S: AsRef<str>>(
    node: ego_tree::NodeRef<scraper::Node>,
    noise_tags: &[S],
    output: &mut String,
) {
    match node.value() {
        scraper::Node::Text(text) => {
            output.push_str(text);
            // Boundary space so adjacent tags never glue words together.
            output.push(' ');
        }
        scraper::Node::Element(el) => {
            if noise_tags
                .iter()
                .any(|t| el.name().eq_ignore_ascii_case(t.as_ref()))
            {
                return;
            }
            for child in node.children() {
                collect_text(child, noise_tags, output);
            }
        }
        _ => {}
    }
}

/// Number of characters in a string. Caps and thresholds throughout the
/// pipeline are measured in characters, not bytes.
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the nth character, or None when the string has n chars or fewer.
fn byte_index_of_char(text: &str, n: usize) -> Option<usize> {
    text.char_indices().nth(n).map(|(i, _)| i)
}

/// Truncates to at most `cap` characters, appending the ellipsis marker when
/// anything was cut. Text at or under the cap is returned unchanged.
pub fn truncate_chars(text: &str, cap: usize) -> String {
    match byte_index_of_char(text, cap) {
        Some(cut) => {
            let mut out = text[..cut].to_string();
            out.push_str(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}

/// Truncates to at most `cap` characters, preferring to cut just after a
/// sentence terminal (`.`, `!`, `?`) found within the last `lookback`
/// characters below the cap. Falls back to a hard cut at the cap when no
/// terminal is nearby. The ellipsis marker is appended unless the text
/// already ends with one.
pub fn truncate_at_sentence(text: &str, cap: usize, lookback: usize) -> String {
    let Some(hard_cut) = byte_index_of_char(text, cap) else {
        return text.to_string();
    };

    let start = cap.saturating_sub(lookback);
    let window: Vec<(usize, char)> = text.char_indices().skip(start).take(cap - start).collect();

    let mut cut = hard_cut;
    for &(idx, ch) in window.iter().rev() {
        if matches!(ch, '.' | '!' | '?') {
            cut = idx + ch.len_utf8();
            break;
        }
    }

    let mut out = text[..cut].to_string();
    if !out.ends_with(ELLIPSIS) {
        out.push_str(ELLIPSIS);
    }
    out
}
