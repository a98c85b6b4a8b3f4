//! Exponential backoff with jitter for startup retry loops.

use std::{fmt::Display, future::Future, time::Duration};

use rand::Rng;

/// Backoff tuning.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,
    /// Upper bound for any single delay, in milliseconds
    pub max_delay_ms: u64,
    pub multiplier: f64,
    /// Fraction of the delay randomly added or removed (0.0 to 1.0)
    pub jitter_factor: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 250,
            max_delay_ms: 5_000,
            multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

/// Produces growing delays between retries, capped at `max_delay_ms`.
pub struct ExponentialBackoff {
    config: BackoffConfig,
    current_delay_ms: u64,
    attempt: u32,
}

impl ExponentialBackoff {
    pub fn new() -> Self {
        Self::with_config(BackoffConfig::default())
    }

    pub fn with_config(config: BackoffConfig) -> Self {
        let initial = config.initial_delay_ms;
        Self {
            config,
            current_delay_ms: initial,
            attempt: 0,
        }
    }

    /// Returns the delay to wait before the next attempt.
    ///
    /// The first call returns the initial delay; each later call multiplies the
    /// previous delay, caps it and applies jitter.
    pub fn next_delay(&mut self) -> Duration {
        self.attempt += 1;

        let base_delay = if self.attempt == 1 {
            self.config.initial_delay_ms as f64
        } else {
            self.current_delay_ms as f64 * self.config.multiplier
        };
        let capped_delay = base_delay.min(self.config.max_delay_ms as f64);

        let jitter_range = capped_delay * self.config.jitter_factor;
        let final_delay = if jitter_range > 0.0 {
            let jitter = rand::rng().random_range(-jitter_range..jitter_range);
            (capped_delay + jitter).clamp(1.0, self.config.max_delay_ms.max(1) as f64)
        } else {
            capped_delay.max(1.0)
        } as u64;

        self.current_delay_ms = final_delay;

        Duration::from_millis(final_delay)
    }

    /// Number of delays handed out so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `operation` until it succeeds, sleeping between failed attempts.
///
/// Never gives up; every failure is logged at warn level with `what` naming the
/// operation.
pub async fn retry_forever<T, E, F, Fut>(
    what: &str,
    mut backoff: ExponentialBackoff,
    mut operation: F,
) -> T
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    loop {
        match operation().await {
            Ok(value) => return value,
            Err(e) => {
                let delay = backoff.next_delay();
                tracing::warn!(
                    "{} failed (attempt {}), retrying in {:?}: {}",
                    what,
                    backoff.attempt(),
                    delay,
                    e
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
