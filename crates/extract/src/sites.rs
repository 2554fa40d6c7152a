// ABOUTME: Site-specific extraction rules matched by URL-host substring.
// ABOUTME: Ordered registry of SiteExtractor trait objects plus the built-in rule set.

use std::fmt;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::text::{char_count, element_text, truncate_chars, DEFAULT_NOISE_TAGS};

/// Minimum length a site-rule extraction must exceed to count. Shorter
/// matches usually mean the selector hit a summary or snippet rather than
/// the article body.
pub const SITE_MIN_CONTENT_LEN: usize = 200;

/// Placeholder for npm package pages hidden behind the verification interstitial.
pub const NPM_BLOCKED_PLACEHOLDER: &str =
    "npm package page is behind bot verification and cannot be fetched directly. Follow the link for details.";

/// An extraction rule tuned to one site's markup.
///
/// `extract` returning None means the rule failed; the pipeline then falls
/// through to the generic heuristics. Rules never error.
pub trait SiteExtractor: Send + Sync {
    /// Rule name, used in logs.
    fn name(&self) -> &'static str;

    /// True when this rule applies to the given URL host.
    fn matches(&self, host: &str) -> bool;

    /// Extract body text from the document, or None when the rule fails.
    fn extract(&self, doc: &Html) -> Option<String>;
}

/// Declarative selector-chain rule.
///
/// Selectors are tried in order and the first one with a matching node is
/// used. Noise-tag subtrees are excluded from the text, results at or under
/// the minimum length fail the rule, and the result is capped with an
/// ellipsis marker when cut.
pub struct SiteRule {
    name: &'static str,
    hosts: &'static [&'static str],
    chain: Vec<(Selector, usize)>,
    min_len: usize,
}

impl SiteRule {
    /// Build a rule from a selector chain of (css, max length) pairs.
    /// Unparseable selectors are dropped from the chain.
    pub fn new(
        name: &'static str,
        hosts: &'static [&'static str],
        chain: &[(&str, usize)],
    ) -> Self {
        let chain = chain
            .iter()
            .filter_map(|(css, cap)| Selector::parse(css).ok().map(|s| (s, *cap)))
            .collect();
        Self {
            name,
            hosts,
            chain,
            min_len: SITE_MIN_CONTENT_LEN,
        }
    }

    /// Override the minimum viable length for this rule.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }
}

impl SiteExtractor for SiteRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| host.contains(h))
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        let (element, cap) = self
            .chain
            .iter()
            .find_map(|(sel, cap)| doc.select(sel).next().map(|el| (el, *cap)))?;

        let text = element_text(&element, DEFAULT_NOISE_TAGS);
        if char_count(&text) <= self.min_len {
            return None;
        }
        Some(truncate_chars(&text, cap))
    }
}

/// npm package pages. The Cloudflare interstitial is special-cased on the
/// page title before the description nodes are tried.
pub struct NpmSite {
    chain: SiteRule,
}

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

impl NpmSite {
    pub fn new() -> Self {
        Self {
            chain: SiteRule::new(
                "npm",
                &["npmjs.com"],
                &[
                    ("p[data-testid='description']", 2000),
                    (".package-description", 2000),
                ],
            ),
        }
    }
}

impl Default for NpmSite {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteExtractor for NpmSite {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn matches(&self, host: &str) -> bool {
        self.chain.matches(host)
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        let interstitial = doc
            .select(&TITLE_SELECTOR)
            .next()
            .map(|t| t.text().collect::<String>().to_lowercase())
            .map_or(false, |title| title.contains("just a moment"));
        if interstitial {
            return Some(NPM_BLOCKED_PLACEHOLDER.to_string());
        }
        self.chain.extract(doc)
    }
}

/// Ordered collection of site rules.
///
/// Lookup walks registration order; the first rule whose `matches` accepts
/// the host wins. There is no priority beyond order.
pub struct SiteRegistry {
    rules: Vec<Box<dyn SiteExtractor>>,
}

impl SiteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// A registry preloaded with the built-in rules.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SiteRule::new(
            "anthropic",
            &["anthropic.com"],
            &[("article", 3000)],
        )));
        registry.register(Box::new(SiteRule::new(
            "github",
            &["github.com"],
            &[("article.markdown-body", 2000)],
        )));
        registry.register(Box::new(NpmSite::new()));
        registry
    }

    /// Append a rule. Later registrations lose ties to earlier ones.
    pub fn register(&mut self, rule: Box<dyn SiteExtractor>) {
        self.rules.push(rule);
    }

    /// The first registered rule matching the host, if any.
    pub fn lookup(&self, host: &str) -> Option<&dyn SiteExtractor> {
        self.rules
            .iter()
            .find(|rule| rule.matches(host))
            .map(|rule| rule.as_ref())
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for SiteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("SiteRegistry").field("rules", &names).finish()
    }
}
