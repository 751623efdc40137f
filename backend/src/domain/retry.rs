//! Bounded exponential back-off for transient store failures.
//!
//! [`Retrier`] reruns an async operation while it fails with a transient
//! [`AssociationStoreError`] and attempts remain. Sleeping and jitter sit
//! behind traits so tests can observe the schedule without waiting on the
//! wall clock.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::warn;

use crate::domain::ports::AssociationStoreError;

/// Attempt budget and delay bounds for the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first call.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each later retry.
    pub base_delay: Duration,
    /// Upper bound on the un-jittered delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Un-jittered delay to wait after the given failed attempt (1-based).
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use user_items::domain::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.backoff_for(1), Duration::from_millis(50));
    /// assert_eq!(policy.backoff_for(2), Duration::from_millis(100));
    /// ```
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(attempt.saturating_sub(1));
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max_delay.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(u64::from(exponent)).min(max_ms))
    }
}

/// Async sleeping abstraction used between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the current task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Spreads retry delays so concurrent callers do not retry in lockstep.
pub trait BackoffJitter: Send + Sync {
    /// Return the delay to actually wait given the un-jittered `base`.
    fn jittered_delay(&self, base: Duration, attempt: u32) -> Duration;
}

/// Adds a uniformly random extra of up to half the base delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl BackoffJitter for RandomJitter {
    fn jittered_delay(&self, base: Duration, _attempt: u32) -> Duration {
        let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
        let max_extra = base_ms / 2;
        let extra = rand::thread_rng().gen_range(0..=max_extra);
        Duration::from_millis(base_ms.saturating_add(extra))
    }
}

/// Uses the base delay unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl BackoffJitter for NoJitter {
    fn jittered_delay(&self, base: Duration, _attempt: u32) -> Duration {
        base
    }
}

/// Runs store operations under a [`RetryPolicy`].
#[derive(Clone)]
pub struct Retrier {
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    jitter: Arc<dyn BackoffJitter>,
}

impl Default for Retrier {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl Retrier {
    /// Build a retrier that sleeps on Tokio and applies random jitter.
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_runtime(policy, Arc::new(TokioSleeper), Arc::new(RandomJitter))
    }

    /// Build a retrier with explicit sleeping and jitter strategies.
    pub fn with_runtime(
        policy: RetryPolicy,
        sleeper: Arc<dyn Sleeper>,
        jitter: Arc<dyn BackoffJitter>,
    ) -> Self {
        Self {
            policy,
            sleeper,
            jitter,
        }
    }

    /// Policy this retrier applies.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Run `operation` until it succeeds, fails permanently, or the attempt
    /// budget is spent. The last error is returned unchanged.
    pub async fn run<T, F, Fut>(
        &self,
        operation_name: &'static str,
        mut operation: F,
    ) -> Result<T, AssociationStoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AssociationStoreError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && attempt < max_attempts => {
                    let delay = self
                        .jitter
                        .jittered_delay(self.policy.backoff_for(attempt), attempt);
                    warn!(
                        operation = operation_name,
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %error,
                        "transient store failure; retrying"
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
