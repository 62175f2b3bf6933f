//! Randomized exponential backoff around any fallible async call.
//!
//! Retry `n` (1-indexed) sleeps a uniform duration in
//! `[base_delay, min(max_delay, base_delay * 2^(n-1))]`.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

const DEFAULT_MAX_ATTEMPTS: u32 = 6;
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// No sleeping between attempts. Used by tests and by callers that
    /// already sit behind their own rate limiting.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter: false,
        }
    }

    /// Upper bound of the sleep before retry `retry` (1-indexed).
    pub fn ceiling(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    pub fn delay_for(&self, retry: u32) -> Duration {
        let ceiling = self.ceiling(retry);
        let floor = self.base_delay.min(ceiling);
        if !self.jitter || ceiling <= floor {
            return ceiling;
        }
        let secs = rand::rng().random_range(floor.as_secs_f64()..=ceiling.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// Run `op` until it succeeds or `max_attempts` calls have failed.
    /// The closure receives the 1-indexed attempt number. On exhaustion the
    /// last error is returned.
    pub async fn run<T, E, F, Fut>(&self, operation: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= max_attempts => {
                    warn!(operation, attempts = attempt, error = %e, "Retries exhausted");
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        operation,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Attempt failed, retrying after backoff"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn default_policy_matches_six_attempts_one_to_sixty_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 6);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
        assert_eq!(policy.max_delay, Duration::from_secs(60));
    }

    #[test]
    fn ceiling_doubles_then_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.ceiling(1), Duration::from_secs(1));
        assert_eq!(policy.ceiling(2), Duration::from_secs(2));
        assert_eq!(policy.ceiling(5), Duration::from_secs(16));
        assert_eq!(policy.ceiling(7), Duration::from_secs(60));
        assert_eq!(policy.ceiling(40), Duration::from_secs(60));
    }

    #[test]
    fn jittered_delay_stays_within_bounds() {
        let policy = RetryPolicy::default();
        for retry in 1..=8 {
            for _ in 0..50 {
                let delay = policy.delay_for(retry);
                assert!(delay >= Duration::from_secs(1));
                assert!(delay <= policy.ceiling(retry));
            }
        }
    }

    #[test]
    fn without_jitter_uses_ceiling() {
        let policy = RetryPolicy {
            jitter: false,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn succeeds_on_sixth_attempt_after_five_failures() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::immediate(6);

        let result: Result<&str, String> = policy
            .run("flaky", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt <= 5 {
                        Err(format!("transient failure {attempt}"))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn returns_last_error_after_exhaustion() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::immediate(6);

        let result: Result<(), String> = policy
            .run("always-down", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(format!("failure {attempt}")) }
            })
            .await;

        assert_eq!(result, Err("failure 6".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn zero_attempts_still_calls_once() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = RetryPolicy::immediate(0)
            .run("once", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(7) }
            })
            .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
