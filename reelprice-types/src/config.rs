//! Configuration types shared across the orchestrator and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::ReelError;

/// Connection settings for the upstream provider API.
///
/// Passed explicitly into connector constructors; nothing is read from
/// process-wide state. Call timeouts live in [`ReelConfig::provider_timeout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the upstream API; `/api/{provider}/...` is appended to it.
    pub base_url: Url,
    /// Opaque access token sent as `x-access-token`.
    pub token: String,
}

impl ProviderConfig {
    /// Parse `base_url` and build a config.
    ///
    /// # Errors
    /// Returns `Config` if `base_url` is not an absolute URL that can carry a path.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ReelError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| ReelError::Config(format!("invalid base url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ReelError::Config(format!(
                "base url '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self {
            base_url,
            token: token.into(),
        })
    }
}

/// Exponential backoff applied between attempts of a failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay before the second attempt, in milliseconds.
    pub initial_delay_ms: u64,
    /// Multiplier applied to the delay after each failure (>= 1).
    pub factor: u32,
    /// Optional ceiling for the delay. `None` lets it grow without bound.
    pub max_delay_ms: Option<u64>,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1_000,
            factor: 2,
            max_delay_ms: None,
            jitter_percent: 0,
        }
    }
}

impl BackoffConfig {
    /// Delay to wait after `failures` consecutive failures (1-based), before jitter.
    #[must_use]
    pub fn delay_after(&self, failures: u32) -> Duration {
        let exp = failures.saturating_sub(1);
        let mut ms = self.initial_delay_ms;
        for _ in 0..exp {
            ms = ms.saturating_mul(u64::from(self.factor.max(1)));
            if let Some(cap) = self.max_delay_ms
                && ms >= cap
            {
                break;
            }
        }
        if let Some(cap) = self.max_delay_ms {
            ms = ms.min(cap);
        }
        Duration::from_millis(ms)
    }
}

/// When a retrier gives up on a call that keeps failing transiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RetryStop {
    /// Retry until the call succeeds or fails fatally.
    #[default]
    Never,
    /// Stop after this many attempts in total (values below 1 act as 1).
    MaxAttempts(u32),
    /// Stop once this much time has passed since the first attempt.
    MaxElapsed(Duration),
}

/// Backoff plus stop condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Delay schedule between attempts.
    pub backoff: BackoffConfig,
    /// When to give up.
    pub stop: RetryStop,
}

/// How catalog aggregation reacts to a provider whose catalog cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CatalogPolicy {
    /// Any provider failure fails the whole aggregation.
    #[default]
    RequireAll,
    /// Skip failed providers; fail only when every provider failed.
    AllowPartial,
}

/// Global configuration for the `Reel` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelConfig {
    /// Retry policy used for every catalog and detail fetch.
    pub retry: RetryPolicy,
    /// Behaviour when a catalog fetch ultimately fails.
    pub catalog_policy: CatalogPolicy,
    /// Timeout for individual provider calls; exceeding it is a transient failure.
    pub provider_timeout: Duration,
    /// Optional deadline over a whole aggregation or price resolution.
    pub request_timeout: Option<Duration>,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self::interactive()
    }
}

impl ReelConfig {
    /// Standalone command-line use: retry forever with uncapped doubling, no deadline.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            retry: RetryPolicy::default(),
            catalog_policy: CatalogPolicy::RequireAll,
            provider_timeout: Duration::from_secs(1),
            request_timeout: None,
        }
    }

    /// Request-serving use: bounded retries, capped delay, partial catalogs
    /// tolerated, and an overall deadline so an upstream outage cannot stall
    /// a request indefinitely.
    #[must_use]
    pub fn served() -> Self {
        Self {
            retry: RetryPolicy {
                backoff: BackoffConfig {
                    max_delay_ms: Some(8_000),
                    ..BackoffConfig::default()
                },
                stop: RetryStop::MaxAttempts(5),
            },
            catalog_policy: CatalogPolicy::AllowPartial,
            provider_timeout: Duration::from_secs(5),
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}
