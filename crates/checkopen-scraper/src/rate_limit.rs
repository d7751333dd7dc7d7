//! Process-wide request spacing for the remote site.
//!
//! The site throttles aggressively, so every outbound request goes through a
//! single [`RateLimiter`]: at most one request is in flight at a time, and a
//! new request starts no earlier than `min_interval` plus a random jitter
//! after the previous one finished. The limiter is owned by
//! [`crate::WongnaiClient`] behind an `Arc` and shared by every concurrent
//! lookup on that client.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    max_jitter: Duration,
    /// Completion time of the previous request; `None` before the first one.
    last_completed: Mutex<Option<Instant>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(min_interval: Duration, max_jitter: Duration) -> Self {
        Self {
            min_interval,
            max_jitter,
            last_completed: Mutex::new(None),
        }
    }

    /// A limiter that still serializes requests but adds no spacing.
    #[must_use]
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Waits for the request slot and for the spacing delay to elapse.
    ///
    /// The slot stays taken until the returned permit is dropped; dropping it
    /// records the completion time that the next caller spaces from.
    pub async fn acquire(&self) -> RequestPermit<'_> {
        let guard = self.last_completed.lock().await;

        if let Some(last) = *guard {
            let ready_at = last + self.min_interval + self.jitter();
            let now = Instant::now();
            if ready_at > now {
                let wait = ready_at - now;
                tracing::debug!(
                    wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                    "spacing outbound request"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }

        RequestPermit { guard }
    }

    fn jitter(&self) -> Duration {
        if self.max_jitter.is_zero() {
            return Duration::ZERO;
        }
        self.max_jitter.mul_f64(rand::random::<f64>())
    }
}

/// Exclusive right to issue one request. See [`RateLimiter::acquire`].
#[must_use = "the request slot is released as soon as the permit is dropped"]
pub struct RequestPermit<'a> {
    guard: MutexGuard<'a, Option<Instant>>,
}

impl Drop for RequestPermit<'_> {
    fn drop(&mut self) {
        *self.guard = Some(Instant::now());
    }
}
