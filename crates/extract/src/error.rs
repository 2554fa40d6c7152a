// ABOUTME: Error types for document fetching including the FetchError enum.
// ABOUTME: Provides categorized failures with convenience constructors and boolean helpers.

/// Errors produced while fetching a page.
///
/// Extraction itself never fails with an error; every extraction outcome is
/// expressed through [`crate::ExtractReason`]. Fetch errors exist so the
/// retry layer and the pipeline can tell transport trouble apart from bad
/// status codes.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {url} timed out")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("response body for {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: usize },
}

impl FetchError {
    /// Create an InvalidUrl error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        FetchError::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a reqwest error, classifying timeouts separately.
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            FetchError::Timeout { url }
        } else {
            FetchError::Request { url, source }
        }
    }

    /// Create a Status error.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        FetchError::Status {
            url: url.into(),
            status,
        }
    }

    /// Create a TooLarge error.
    pub fn too_large(url: impl Into<String>, limit: usize) -> Self {
        FetchError::TooLarge {
            url: url.into(),
            limit,
        }
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }

    /// Returns true if this is a bad-status error.
    pub fn is_status(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }

    /// The HTTP status behind this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for transport-level failures (connect errors, timeouts).
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Request { .. } | FetchError::Timeout { .. })
    }
}
