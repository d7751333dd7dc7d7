use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("venue id must not be empty")]
    InvalidVenueId,

    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("rate limited by {domain} (HTTP 429)")]
    RateLimited {
        domain: String,
        retry_after_secs: Option<u64>,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("lookup of venue {venue_id} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        venue_id: String,
        attempts: u32,
        #[source]
        source: Box<ScraperError>,
    },
}

impl ScraperError {
    /// Returns `true` if the failed attempt may succeed when repeated.
    ///
    /// Network failures, timeouts, 429 and 5xx responses are transient. Any
    /// other 4xx means the page itself is unavailable and retrying returns
    /// the same answer.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } | Self::RateLimited { .. } => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            Self::ClientBuild(_)
            | Self::InvalidBaseUrl { .. }
            | Self::InvalidVenueId
            | Self::RetriesExhausted { .. } => false,
        }
    }

    /// The error of the final attempt, looking through [`Self::RetriesExhausted`].
    #[must_use]
    pub fn last_attempt_error(&self) -> &ScraperError {
        match self {
            Self::RetriesExhausted { source, .. } => source.last_attempt_error(),
            other => other,
        }
    }
}

/// Failure to decode an embedded status blob.
///
/// Never surfaced to callers: the pipeline logs it and falls back to the
/// page text.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed window._wn blob: {0}")]
    MalformedBlob(#[from] serde_json::Error),
}
