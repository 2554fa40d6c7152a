// ABOUTME: HTTP fetching with retry, content-length limits, and charset decoding.
// ABOUTME: Provides the shared client builder and the Page type returned by fetches.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

use crate::error::FetchError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Status codes worth retrying: rate limiting and transient server failures.
pub const RETRY_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// Retry behavior for a fetch. `max_retries` counts retries after the first
/// attempt; backoff doubles on each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    /// Backoff before the retry following the given failed attempt (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

/// A fetched page with its response metadata and raw body.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Page {
    /// Decode the body to text, honoring the response charset when present
    /// and falling back to byte-level detection.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Build the shared HTTP client with browser-like default headers.
///
/// Invalid entries in `extra_headers` are skipped with a warning rather than
/// failing the build.
pub fn build_client(
    user_agent: &str,
    timeout: Duration,
    extra_headers: &HashMap<String, String>,
) -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );
    for (key, value) in extra_headers {
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(val)) => {
                headers.insert(name, val);
            }
            _ => warn!("Ignoring invalid header {:?}", key),
        }
    }

    reqwest::Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(timeout)
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
        .expect("failed to build HTTP client")
}

/// Fetch a URL, retrying transient failures per the policy.
pub async fn fetch_page(
    client: &reqwest::Client,
    url: &str,
    policy: &RetryPolicy,
) -> Result<Page, FetchError> {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match fetch_once(client, url).await {
            Ok(page) => return Ok(page),
            Err(err) if attempt <= policy.max_retries && is_retryable(&err) => {
                let wait = policy.backoff_for(attempt);
                debug!(
                    "Retrying {} after {:?} (attempt {} failed: {})",
                    url, wait, attempt, err
                );
                tokio::time::sleep(wait).await;
            }
            Err(err) => return Err(err),
        }
    }
}

fn is_retryable(err: &FetchError) -> bool {
    if err.is_transport() {
        return true;
    }
    err.status_code()
        .map_or(false, |status| RETRY_STATUSES.contains(&status))
}

async fn fetch_once(client: &reqwest::Client, url: &str) -> Result<Page, FetchError> {
    if url.is_empty() {
        return Err(FetchError::invalid_url(url, "empty URL"));
    }
    let parsed =
        url::Url::parse(url).map_err(|e| FetchError::invalid_url(url, e.to_string()))?;
    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(FetchError::invalid_url(url, "scheme must be http or https"));
    }

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::request(url, e))?;

    // Check Content-Length before reading the body; responses without the
    // header are checked again after the read.
    let content_length = response.content_length().or_else(|| {
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    });
    if let Some(len) = content_length {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(FetchError::too_large(url, MAX_CONTENT_LENGTH));
        }
    }

    let status = response.status();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    if !status.is_success() {
        return Err(FetchError::status(url, status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::request(url, e))?;
    if body.len() > MAX_CONTENT_LENGTH {
        return Err(FetchError::too_large(url, MAX_CONTENT_LENGTH));
    }

    Ok(Page {
        status: status.as_u16(),
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}

/// Decode body bytes using the content-type charset, else chardetng detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(sniff_charset)
        .and_then(|charset| encoding_rs::Encoding::for_label(charset.as_bytes()));

    match encoding {
        Some(encoding) => {
            let (decoded, _, _) = encoding.decode(body);
            decoded.into_owned()
        }
        None => {
            let mut detector = chardetng::EncodingDetector::new();
            detector.feed(body, true);
            let (decoded, _, _) = detector.guess(None, true).decode(body);
            decoded.into_owned()
        }
    }
}

/// Pull the charset value out of a Content-Type header.
fn sniff_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if key.eq_ignore_ascii_case("charset") {
            Some(value.trim_matches(['"', '\'']).to_ascii_lowercase())
        } else {
            None
        }
    })
}
