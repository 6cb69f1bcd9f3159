//! Bounded retry with exponential backoff for idempotent ledger reads
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based), without jitter
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Backoff plus up to 25% random jitter
    fn delay_for(&self, attempt: u32) -> Duration {
        let backoff = self.backoff(attempt);
        let jitter_ms = backoff.as_millis() as u64 / 4;
        if jitter_ms == 0 {
            return backoff;
        }
        let jitter = rand::thread_rng().gen_range(0..=jitter_ms);
        backoff + Duration::from_millis(jitter)
    }
}

/// Run `op` until it succeeds or `policy.max_attempts` is reached
///
/// Only use this for reads. Writes must never go through here since a
/// failed response does not prove the side effect did not happen.
pub async fn retry_read<T, E, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    "{} failed (attempt {}/{}): {}. Retrying in {}ms",
                    label,
                    attempt,
                    max_attempts,
                    e,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                debug!("{} giving up after {} attempt(s)", label, attempt);
                return Err(e);
            }
        }
    }
}
