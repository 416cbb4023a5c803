//! Exponential backoff with jitter for transient request failures

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::Result;

/// Retry policy for remote calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryConfig {
    /// No retries at all
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-based), jitter included
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay);
        let jitter_cap = base.as_millis() as u64 / 4;
        let jitter = if jitter_cap == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=jitter_cap)
        };
        (base + Duration::from_millis(jitter)).min(self.max_delay)
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// retry budget is spent. The last error is returned.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, label: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < config.max_retries => {
                let delay = config.delay_for(attempt);
                warn!(
                    "{} failed (attempt {}/{}), retrying in {:?}: {}",
                    label,
                    attempt + 1,
                    config.max_retries + 1,
                    delay,
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn delay_is_capped() {
        let config = RetryConfig {
            max_retries: 10,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1000),
        };
        assert!(config.delay_for(0) >= Duration::from_millis(100));
        assert!(config.delay_for(0) <= Duration::from_millis(125));
        assert_eq!(config.delay_for(9), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn transport_errors_are_retried_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast(3), "page", || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(Error::transport("http://wiki", "connection reset"))
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn decode_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_retry(&fast(3), "page", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::decode("page 0", "expected value"))
        })
        .await;

        assert!(matches!(result, Err(Error::Decode { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_retry(&fast(2), "unit", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::transport("http://wiki", "timed out"))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
