//! HTTP client for venue pages.

mod origin;

use std::sync::Arc;
use std::time::Duration;

use checkopen_core::{AppConfig, VenueStatus, DEFAULT_BASE_URL};
use reqwest::{Client, StatusCode, Url};

use crate::error::ScraperError;
use crate::normalize::normalize_status;
use crate::rate_limit::RateLimiter;
use crate::retry::{run_lookup, RetryPolicy};
use crate::types::FetchedPage;

const CONNECT_TIMEOUT_SECS: u64 = 10;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Thai first; the English page lacks some of the status phrases.
const ACCEPT_LANGUAGE: &str = "th-TH,th;q=0.9,en-US;q=0.8,en;q=0.7";

/// Looks up venue open/closed status on the remote site.
///
/// Every request goes through the client's [`RateLimiter`], which may also be
/// shared with other clients through the same `Arc`. The client is
/// `Send + Sync`; share it behind an `Arc` rather than building one per
/// request.
#[derive(Debug)]
pub struct WongnaiClient {
    client: Client,
    base_url: Url,
    referer: String,
    timeout_secs: u64,
    retry: RetryPolicy,
    limiter: Arc<RateLimiter>,
}

impl WongnaiClient {
    /// Creates a client for the public site.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ClientBuild`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        retry: RetryPolicy,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self, ScraperError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent, retry, limiter)
    }

    /// Creates a client that fetches venue pages from `base_url` instead of
    /// the public site.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute
    ///   http(s) URL.
    /// - [`ScraperError::ClientBuild`] if the HTTP client cannot be built.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        retry: RetryPolicy,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self, ScraperError> {
        let base_url = origin::parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs)))
            .user_agent(user_agent)
            .build()
            .map_err(ScraperError::ClientBuild)?;
        Ok(Self {
            client,
            referer: origin::referer_for(&base_url),
            base_url,
            timeout_secs,
            retry,
            limiter,
        })
    }

    /// Builds a client, with its own rate limiter, from loaded configuration.
    ///
    /// # Errors
    ///
    /// Same as [`Self::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let limiter = RateLimiter::new(
            Duration::from_millis(config.min_request_interval_ms),
            Duration::from_millis(config.max_jitter_ms),
        );
        let retry = RetryPolicy::new(
            config.max_retries,
            Duration::from_millis(config.backoff_unit_ms),
        );
        Self::with_base_url(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
            retry,
            Arc::new(limiter),
        )
    }

    /// Resolves the current status of one venue.
    ///
    /// A page that loads but shows no status is not an error: it yields a
    /// status labelled `unknown`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidVenueId`] if `venue_id` is blank.
    /// - [`ScraperError::UnexpectedStatus`] for a 4xx other than 429 (not retried).
    /// - [`ScraperError::RetriesExhausted`] when every attempt failed with a
    ///   network error, timeout, 429 or 5xx.
    pub async fn lookup(&self, venue_id: &str) -> Result<VenueStatus, ScraperError> {
        let venue_id = venue_id.trim();
        if venue_id.is_empty() {
            return Err(ScraperError::InvalidVenueId);
        }

        let url = origin::venue_url(&self.base_url, venue_id);
        tracing::info!(venue_id, %url, "looking up venue status");

        let url = &url;
        let signal = run_lookup(venue_id, &self.retry, || self.fetch_page(url)).await?;
        let status = normalize_status(venue_id, signal);

        tracing::info!(
            venue_id,
            status = %status.status(),
            open_until = status.open_until(),
            "venue status resolved"
        );
        Ok(status)
    }

    /// Performs one rate-limited GET of `url`.
    ///
    /// The limiter slot is held until the body has been read.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] for HTTP 429.
    /// - [`ScraperError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ScraperError::Timeout`] when the request exceeds the timeout.
    /// - [`ScraperError::Network`] for connection or body read failures.
    pub async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, ScraperError> {
        let _permit = self.limiter.acquire().await;

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(reqwest::header::REFERER, &self.referer)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok());
            return Err(ScraperError::RateLimited {
                domain: origin::domain_of(url),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify(url, e))?;

        let page = FetchedPage {
            status: status.as_u16(),
            body: body.to_vec(),
        };
        tracing::debug!(%url, status = page.status, bytes = page.body.len(), "fetched venue page");
        Ok(page)
    }

    fn classify(&self, url: &Url, err: reqwest::Error) -> ScraperError {
        if err.is_timeout() {
            ScraperError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout_secs,
            }
        } else {
            ScraperError::Network {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
