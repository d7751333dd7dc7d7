use std::net::SocketAddr;

/// Public origin of the venue pages.
pub const DEFAULT_BASE_URL: &str = "https://www.wongnai.com";

/// Desktop Chrome user agent; the site serves a reduced page to obvious bots.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Production switches the server to machine-readable (JSON) logs.
    #[must_use]
    pub fn json_logs(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Scheme + host the venue pages are fetched from.
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Minimum gap between two outbound requests, before jitter.
    pub min_request_interval_ms: u64,
    /// Upper bound of the random delay added on top of `min_request_interval_ms`.
    pub max_jitter_ms: u64,
    pub max_retries: u32,
    /// Attempt `n` waits `backoff_unit_ms * 2^n` before fetching.
    pub backoff_unit_ms: u64,
}
