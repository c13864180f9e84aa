use std::sync::Arc;
use std::time::Duration;

use reelprice_core::{
    Capability, CatalogPolicy, Provider, ReelConfig, ReelConnector, ReelError, RetryPolicy,
};

/// Orchestrator that builds the merged title index and resolves cheapest prices
/// across registered providers.
pub struct Reel {
    pub(crate) connectors: Vec<Arc<dyn ReelConnector>>,
    pub(crate) cfg: ReelConfig,
}

/// Builder for constructing a `Reel` orchestrator with custom configuration.
pub struct ReelBuilder {
    connectors: Vec<Arc<dyn ReelConnector>>,
    cfg: ReelConfig,
}

impl Default for ReelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReelBuilder {
    /// Create a new builder with the interactive defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors; you must register at least one via [`Self::with_connector`].
    /// - Defaults retry transient failures forever with doubling delays and
    ///   no request deadline. Use [`Self::config`] with [`ReelConfig::served`]
    ///   for bounded behaviour.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: ReelConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order does not matter: connectors are ordered by provider
    /// precedence when the orchestrator is built.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn ReelConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration, e.g. with [`ReelConfig::served`].
    #[must_use]
    pub fn config(mut self, cfg: ReelConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the retry policy used for every catalog and detail fetch.
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.cfg.retry = policy;
        self
    }

    /// Select how catalog aggregation treats a provider that keeps failing.
    ///
    /// Behavior and trade-offs:
    /// - `RequireAll`: the index is only built from complete data; one
    ///   provider outage fails the whole aggregation.
    /// - `AllowPartial`: failed providers are dropped with a warning, so prices
    ///   may come from fewer providers than usual.
    #[must_use]
    pub const fn catalog_policy(mut self, policy: CatalogPolicy) -> Self {
        self.cfg.catalog_policy = policy;
        self
    }

    /// Set the per-provider call timeout. A call that exceeds it counts as a
    /// transient failure and is retried.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for index builds and price resolutions.
    ///
    /// When exceeded, returns a `RequestTimeout` error for the capability.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `Reel` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered, or if two
    /// connectors speak for the same provider.
    pub fn build(mut self) -> Result<Reel, ReelError> {
        if self.connectors.is_empty() {
            return Err(ReelError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        self.connectors.sort_by_key(|c| c.provider());
        if let Some(pair) = self
            .connectors
            .windows(2)
            .find(|w| w[0].provider() == w[1].provider())
        {
            return Err(ReelError::InvalidArg(format!(
                "provider {} registered twice ({} and {})",
                pair[0].provider(),
                pair[0].name(),
                pair[1].name()
            )));
        }

        Ok(Reel {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Attribute an opaque error to the connector that produced it.
///
/// Classified errors pass through untouched so retry decisions and
/// presenter mappings still see them.
pub fn tag_err(connector: &str, e: ReelError) -> ReelError {
    match e {
        ReelError::Other(msg) => ReelError::Connector {
            connector: connector.to_string(),
            msg,
        },
        other => other,
    }
}

/// Run `fut` under an optional request-level deadline.
///
/// # Errors
/// Returns `RequestTimeout` for `capability` when the deadline elapses first.
pub async fn with_request_deadline<T, Fut>(
    capability: Capability,
    deadline: Option<Duration>,
    fut: Fut,
) -> Result<T, ReelError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| ReelError::request_timeout(capability)),
        None => Ok(fut.await),
    }
}

impl Reel {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "reelprice::core::provider_call_with_timeout",
            skip(fut),
            fields(
                provider = %provider,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        provider: Provider,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, ReelError>
    where
        Fut: core::future::Future<Output = Result<T, ReelError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(ReelError::provider_timeout(provider, capability)))
    }

    /// Start building a new `Reel` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use reelprice::{Reel, ReelConfig};
    /// use reelprice_mock::MockConnector;
    ///
    /// let reel = Reel::builder()
    ///     .with_connector(Arc::new(MockConnector::filmworld()))
    ///     .with_connector(Arc::new(MockConnector::cinemaworld()))
    ///     .config(ReelConfig::served())
    ///     .build()?;
    /// let index = reel.build_index().await?;
    /// let best = reel.cheapest("star wars: the force awakens", &index).await?;
    /// ```
    #[must_use]
    pub fn builder() -> ReelBuilder {
        ReelBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ReelConfig {
        &self.cfg
    }

    /// Registered providers in precedence order.
    #[must_use]
    pub fn providers(&self) -> Vec<Provider> {
        self.connectors.iter().map(|c| c.provider()).collect()
    }

    pub(crate) fn connector_for(&self, provider: Provider) -> Option<&Arc<dyn ReelConnector>> {
        self.connectors.iter().find(|c| c.provider() == provider)
    }
}
