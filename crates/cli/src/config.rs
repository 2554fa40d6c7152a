// ABOUTME: Environment-driven settings for the newswire binary.
// ABOUTME: Reads .env-backed variables once at startup with typed fallbacks.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use newswire_listing::{CrawlConfig, DEFAULT_BASE_URL};

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map(|v| is_truthy(&v)).unwrap_or(default)
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Per-source settings for the Hacker News crawler.
#[derive(Debug, Clone, PartialEq)]
pub struct HackerNewsSettings {
    pub base_url: String,
    pub max_pages: u32,
    /// Seconds between listing requests.
    pub delay: u64,
    pub fetch_content: bool,
    /// Request timeout in seconds.
    pub timeout: u64,
}

/// Resolved configuration for one invocation of the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub debug: bool,
    pub log_level: String,
    pub output_dir: String,
    pub default_delay: u64,
    pub default_timeout: u64,
    pub max_retries: u32,
    pub cleanup_days: u64,
    pub hackernews: HackerNewsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            output_dir: "output".to_string(),
            default_delay: 1,
            default_timeout: 30,
            max_retries: 3,
            cleanup_days: 30,
            hackernews: HackerNewsSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                max_pages: 1,
                delay: 1,
                fetch_content: true,
                timeout: 30,
            },
        }
    }
}

impl Settings {
    /// Load settings from the environment, keeping defaults for anything
    /// unset or malformed. `HN_DELAY` and `HN_TIMEOUT` inherit the resolved
    /// global values when absent.
    pub fn from_env() -> Self {
        let default_delay = env_parse("DEFAULT_DELAY", 1);
        let default_timeout = env_parse("DEFAULT_TIMEOUT", 30);
        Self {
            debug: env_bool("DEBUG", false),
            log_level: env_string("LOG_LEVEL", "info"),
            output_dir: env_string("OUTPUT_DIR", "output"),
            default_delay,
            default_timeout,
            max_retries: env_parse("MAX_RETRIES", 3),
            cleanup_days: env_parse("CLEANUP_DAYS", 30),
            hackernews: HackerNewsSettings {
                base_url: env_string("HN_BASE_URL", DEFAULT_BASE_URL),
                max_pages: env_parse("HN_MAX_PAGES", 1),
                delay: env_parse("HN_DELAY", default_delay),
                fetch_content: env_bool("HN_FETCH_CONTENT", true),
                timeout: env_parse("HN_TIMEOUT", default_timeout),
            },
        }
    }

    /// The level the subscriber starts at; `DEBUG` forces debug.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }

    /// Crawl configuration for the Hacker News source.
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            base_url: self.hackernews.base_url.clone(),
            max_pages: self.hackernews.max_pages,
            delay: Duration::from_secs(self.hackernews.delay),
            fetch_content: self.hackernews.fetch_content,
            timeout: Duration::from_secs(self.hackernews.timeout),
            max_retries: self.max_retries,
            ..CrawlConfig::default()
        }
    }

    /// Indented `key: value` lines for the `config` subcommand.
    pub fn describe(&self) -> String {
        let hn = &self.hackernews;
        let lines = [
            format!("  DEBUG: {}", self.debug),
            format!("  LOG_LEVEL: {}", self.log_level),
            format!("  OUTPUT_DIR: {}", self.output_dir),
            format!("  DEFAULT_DELAY: {}", self.default_delay),
            format!("  DEFAULT_TIMEOUT: {}", self.default_timeout),
            format!("  MAX_RETRIES: {}", self.max_retries),
            format!("  CLEANUP_DAYS: {}", self.cleanup_days),
            "  hackernews:".to_string(),
            format!("    base_url: {}", hn.base_url),
            format!("    max_pages: {}", hn.max_pages),
            format!("    delay: {}", hn.delay),
            format!("    fetch_content: {}", hn.fetch_content),
            format!("    timeout: {}", hn.timeout),
        ];
        lines.join("\n")
    }
}
