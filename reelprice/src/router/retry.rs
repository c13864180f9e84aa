use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;

use reelprice_core::{Capability, FetchOutcome, ReelError, RetryPolicy, RetryStop};

/// Add up to `jitter_percent` percent of random delay on top of `base_ms`.
pub fn jitter_wait(base_ms: u64, jitter_percent: u32) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms.saturating_add(rng.random_range(0..jitter_range))
}

/// Re-issues a call while it fails transiently, sleeping with exponential
/// backoff between attempts.
///
/// Fatal failures return immediately. Transient failures are retried until
/// the policy's stop condition is reached, at which point the last failure is
/// wrapped in `RetriesExhausted`. With `RetryStop::Never` a call that never
/// recovers never returns; bound it with a request deadline if that matters.
#[derive(Debug, Clone, Copy)]
pub struct Retrier {
    policy: RetryPolicy,
}

impl Retrier {
    /// Retrier following `policy`.
    #[must_use]
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Delay before the attempt following the `failures`-th failure, jitter included.
    #[must_use]
    pub fn delay_after(&self, failures: u32) -> Duration {
        let base = self.policy.backoff.delay_after(failures);
        let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(jitter_wait(
            base_ms,
            u32::from(self.policy.backoff.jitter_percent.min(100)),
        ))
    }

    fn exhausted(&self, failures: u32, started: Instant) -> bool {
        match self.policy.stop {
            RetryStop::MaxAttempts(n) => failures >= n.max(1),
            RetryStop::MaxElapsed(limit) => started.elapsed() >= limit,
            _ => false,
        }
    }

    /// Run `op` until it succeeds, fails fatally, or the stop condition is reached.
    ///
    /// # Errors
    /// Returns the fatal error as-is, or `RetriesExhausted` carrying the last
    /// transient failure.
    pub async fn retry<T, F, Fut>(&self, capability: Capability, mut op: F) -> Result<T, ReelError>
    where
        F: FnMut() -> Fut,
        Fut: core::future::Future<Output = Result<T, ReelError>>,
    {
        let started = Instant::now();
        let mut failures: u32 = 0;
        loop {
            match FetchOutcome::from(op().await) {
                FetchOutcome::Success(v) => return Ok(v),
                FetchOutcome::Fatal(e) => return Err(e),
                FetchOutcome::TransientFailure(e) => {
                    failures = failures.saturating_add(1);
                    if self.exhausted(failures, started) {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            capability = %capability,
                            attempts = failures,
                            error = %e,
                            "giving up after repeated transient failures"
                        );
                        return Err(ReelError::RetriesExhausted {
                            capability,
                            attempts: failures,
                            last: Box::new(e),
                        });
                    }
                    let delay = self.delay_after(failures);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        capability = %capability,
                        attempt = failures,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "transient failure; backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
