//! Retry controller for venue lookups.
//!
//! `run_lookup` drives up to `max_retries + 1` fetch-and-extract attempts.
//! Each attempt is classified into an `AttemptOutcome`:
//!
//! | Fetch result                         | Outcome   | Next step                 |
//! |--------------------------------------|-----------|---------------------------|
//! | 2xx, status found on page            | `Found`   | stop, return the signal   |
//! | 2xx, nothing recognizable on page    | `Empty`   | stop, status is unknown   |
//! | network error, timeout, 429, 5xx     | `Retry`   | back off, try again       |
//! | any other 4xx                        | `Fatal`   | stop, return the error    |
//!
//! Attempt `n >= 1` is preceded by a sleep of `backoff_unit * 2^n`, so with
//! the default one second unit the waits are 2 s, 4 s and 8 s. A 429 spends
//! an attempt like any other transient failure.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;
use crate::extract::extract_signal;
use crate::types::{FetchedPage, Signal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed after the first one.
    pub max_retries: u32,
    /// Base delay; attempt `n` waits `backoff_unit * 2^n` before it starts.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, backoff_unit: Duration) -> Self {
        Self {
            max_retries,
            backoff_unit,
        }
    }

    /// Sleep taken before attempt number `attempt` (zero-based).
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        self.backoff_unit.saturating_mul(2u32.saturating_pow(attempt))
    }

    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

enum AttemptOutcome {
    Found(Signal),
    Empty,
    Retry(ScraperError),
    Fatal(ScraperError),
}

impl AttemptOutcome {
    fn evaluate(fetched: Result<FetchedPage, ScraperError>) -> Self {
        match fetched {
            Ok(page) => match extract_signal(&page.text()) {
                Some(signal) => Self::Found(signal),
                None => Self::Empty,
            },
            Err(err) if err.is_retriable() => Self::Retry(err),
            Err(err) => Self::Fatal(err),
        }
    }
}

/// Runs `fetch` until a page yields a status, the page is known to carry
/// none, or the attempt budget is spent.
///
/// Returns `Ok(None)` for a well-formed page with no status markers.
///
/// # Errors
///
/// - The fetch error itself when it is not retriable (e.g. HTTP 404).
/// - [`ScraperError::RetriesExhausted`] wrapping the last fetch error once
///   every attempt has failed transiently.
pub(crate) async fn run_lookup<F, Fut>(
    venue_id: &str,
    policy: &RetryPolicy,
    mut fetch: F,
) -> Result<Option<Signal>, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<FetchedPage, ScraperError>>,
{
    let mut attempt = 0u32;
    loop {
        match AttemptOutcome::evaluate(fetch().await) {
            AttemptOutcome::Found(signal) => {
                tracing::debug!(
                    venue_id,
                    attempt,
                    source = ?signal.source,
                    state = ?signal.state,
                    "venue status extracted"
                );
                return Ok(Some(signal));
            }
            AttemptOutcome::Empty => {
                tracing::info!(venue_id, attempt, "page carries no status markers");
                return Ok(None);
            }
            AttemptOutcome::Fatal(err) => return Err(err),
            AttemptOutcome::Retry(err) => {
                if attempt >= policy.max_retries {
                    return Err(ScraperError::RetriesExhausted {
                        venue_id: venue_id.to_owned(),
                        attempts: attempt + 1,
                        source: Box::new(err),
                    });
                }
                attempt += 1;
                let delay = policy.backoff_for(attempt);
                tracing::warn!(
                    venue_id,
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "venue fetch failed, retrying after back-off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::{ready, Ready};
    use std::sync::{Arc, Mutex};

    use tokio::time::Instant;

    use super::*;
    use crate::types::OpenState;

    type Calls = Arc<Mutex<Vec<Instant>>>;

    /// A fetch closure whose answer depends on the zero-based call number,
    /// plus the instants at which it was called.
    fn scripted<R>(
        respond: R,
    ) -> (
        impl FnMut() -> Ready<Result<FetchedPage, ScraperError>>,
        Calls,
    )
    where
        R: Fn(usize) -> Result<FetchedPage, ScraperError>,
    {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);
        let fetch = move || {
            let mut seen = seen.lock().unwrap();
            let call = seen.len();
            seen.push(Instant::now());
            ready(respond(call))
        };
        (fetch, calls)
    }

    fn page(body: &str) -> FetchedPage {
        FetchedPage {
            status: 200,
            body: body.as_bytes().to_vec(),
        }
    }

    fn timeout() -> ScraperError {
        ScraperError::Timeout {
            url: "https://www.wongnai.com/restaurants/1".to_owned(),
            timeout_secs: 15,
        }
    }

    fn http_status(status: u16) -> ScraperError {
        ScraperError::UnexpectedStatus {
            status,
            url: "https://www.wongnai.com/restaurants/1".to_owned(),
        }
    }

    fn gaps(calls: &Calls) -> Vec<Duration> {
        let calls = calls.lock().unwrap();
        calls.windows(2).map(|w| w[1] - w[0]).collect()
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(0), Duration::ZERO);
        assert_eq!(policy.backoff_for(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_for(3), Duration::from_secs(8));
        assert_eq!(policy.total_attempts(), 4);
    }

    #[test]
    fn backoff_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(100, Duration::from_secs(1));
        assert_eq!(
            policy.backoff_for(64),
            Duration::from_secs(u64::from(u32::MAX))
        );
        let huge = RetryPolicy::new(1, Duration::MAX);
        assert_eq!(huge.backoff_for(1), Duration::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn first_success_makes_one_call() {
        let (fetch, calls) = scripted(|_| Ok(page("<p>Open until 22:00</p>")));
        let signal = run_lookup("v1", &RetryPolicy::default(), fetch)
            .await
            .unwrap()
            .expect("signal");
        assert_eq!(signal.state, OpenState::Open);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_back_off_exponentially_then_exhaust() {
        let (fetch, calls) = scripted(|_| Err(timeout()));
        let err = run_lookup("v1", &RetryPolicy::default(), fetch)
            .await
            .unwrap_err();

        match &err {
            ScraperError::RetriesExhausted {
                venue_id,
                attempts,
                source,
            } => {
                assert_eq!(venue_id, "v1");
                assert_eq!(*attempts, 4);
                assert!(matches!(**source, ScraperError::Timeout { .. }));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
        assert!(err.to_string().contains("after 4 attempts"));

        let expected = [2, 4, 8].map(Duration::from_secs);
        let actual = gaps(&calls);
        assert_eq!(actual.len(), expected.len());
        for (got, want) in actual.iter().zip(expected) {
            assert!(
                *got >= want && *got < want + Duration::from_millis(5),
                "gap {got:?}, want {want:?}"
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limited_attempt_is_retried_and_counts() {
        let (fetch, calls) = scripted(|call| {
            if call == 0 {
                Err(ScraperError::RateLimited {
                    domain: "www.wongnai.com".to_owned(),
                    retry_after_secs: Some(30),
                })
            } else {
                Ok(page("<p>ปิดแล้ว</p>"))
            }
        });
        let signal = run_lookup("v1", &RetryPolicy::default(), fetch)
            .await
            .unwrap()
            .expect("signal");
        assert_eq!(signal.state, OpenState::Closed);
        assert_eq!(gaps(&calls), vec![Duration::from_secs(2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limiting_on_every_attempt_exhausts_the_budget() {
        let (fetch, calls) = scripted(|_| {
            Err(ScraperError::RateLimited {
                domain: "www.wongnai.com".to_owned(),
                retry_after_secs: None,
            })
        });
        let err = run_lookup("v1", &RetryPolicy::new(2, Duration::from_millis(10)), fetch)
            .await
            .unwrap_err();
        assert!(matches!(
            err.last_attempt_error(),
            ScraperError::RateLimited { .. }
        ));
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_then_success() {
        let (fetch, calls) = scripted(|call| match call {
            0 => Err(http_status(503)),
            _ => Ok(page("<p>Closing soon</p>")),
        });
        let signal = run_lookup("v1", &RetryPolicy::default(), fetch)
            .await
            .unwrap()
            .expect("signal");
        assert_eq!(signal.state, OpenState::ClosingSoon);
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn not_found_is_not_retried() {
        let (fetch, calls) = scripted(|_| Err(http_status(404)));
        let err = run_lookup("v1", &RetryPolicy::default(), fetch)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScraperError::UnexpectedStatus { status: 404, .. }
        ));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_page_stops_without_retrying() {
        let (fetch, calls) = scripted(|_| Ok(page("<html><body>menu</body></html>")));
        let start = Instant::now();
        let found = run_lookup("v1", &RetryPolicy::default(), fetch)
            .await
            .unwrap();
        assert!(found.is_none());
        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_means_single_attempt() {
        let (fetch, calls) = scripted(|_| Err(timeout()));
        let err = run_lookup("v1", &RetryPolicy::new(0, Duration::from_secs(1)), fetch)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScraperError::RetriesExhausted { attempts: 1, .. }
        ));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }
}
