use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for establishing store connections at startup.
///
/// Request-time store calls are never retried; this is only used while a
/// service is booting and its store may still be coming up.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Scale each delay by a factor in `[0.5, 1.0)`
    pub use_jitter: bool,
}

impl RetryConfig {
    /// 3 retries, 100ms doubling up to 5s, with jitter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Delay before retry number `retry` (1-based), before jitter.
    fn base_delay(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(retry.saturating_sub(1) as i32);
        let millis = self.initial_delay.as_millis() as f64 * factor;
        Duration::from_millis(millis as u64).min(self.max_delay)
    }

    fn delay_for(&self, retry: u32) -> Duration {
        let delay = self.base_delay(retry);
        if self.use_jitter {
            delay.mul_f64(jitter_factor())
        } else {
            delay
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Pseudo-random factor in `[0.5, 1.0)` derived from a randomly seeded hasher.
fn jitter_factor() -> f64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let sample = RandomState::new().hash_one(std::time::SystemTime::now()) % 500;
    0.5 + sample as f64 / 1000.0
}

/// Run `operation` until it succeeds or the retry budget is spent.
///
/// The last error is returned when every attempt fails.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retries = 0;

    loop {
        let err = match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!(retries, "Operation succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if retries >= config.max_retries {
            warn!(attempts = retries + 1, error = %err, "Giving up after repeated failures");
            return Err(err);
        }

        retries += 1;
        let delay = config.delay_for(retries);
        debug!(
            retry = retries,
            max_retries = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Operation failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

/// [`retry_with_backoff`] with [`RetryConfig::default`].
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}
