//! reelprice-http
//!
//! Public connector that implements `ReelConnector` on top of the upstream
//! movie API. One connector speaks for one provider; [`HttpConnector::pair`]
//! builds both providers over a shared `reqwest::Client`.
//!
//! Every failure is classified for the retry loop: timeouts, transport
//! errors, non-success statuses and undecodable bodies are transient, while
//! request-construction problems surface as `Config`. A 404 is reported as
//! `Status`, never as "not found".
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;

use std::sync::Arc;

use adapter::{MoviesApi, RealAdapter};
use async_trait::async_trait;
use reelprice_core::connector::{CatalogProvider, DetailProvider, ReelConnector};
use reelprice_core::{MovieDetail, MovieRecord, Provider, ProviderConfig, ReelError};

/// Public connector type. Production users construct it with [`HttpConnector::new`]
/// or [`HttpConnector::pair`].
pub struct HttpConnector {
    provider: Provider,
    api: Arc<dyn MoviesApi>,
}

impl HttpConnector {
    /// Stable connector name used in logs and error tagging.
    pub const NAME: &'static str = "reelprice-http";

    /// Build a connector for `provider` with its own HTTP client.
    ///
    /// # Errors
    /// Returns `Config` if the token is not a valid header value or the
    /// client cannot be built.
    pub fn new(provider: Provider, config: &ProviderConfig) -> Result<Self, ReelError> {
        let api = RealAdapter::new(config)?;
        Ok(Self::from_adapter(provider, Arc::new(api)))
    }

    /// Build one connector per provider, sharing a single HTTP client.
    ///
    /// Connectors are returned in provider precedence order.
    ///
    /// # Errors
    /// Same as [`HttpConnector::new`].
    pub fn pair(config: &ProviderConfig) -> Result<Vec<Self>, ReelError> {
        let api: Arc<dyn MoviesApi> = Arc::new(RealAdapter::new(config)?);
        Ok(Provider::ALL
            .iter()
            .map(|p| Self::from_adapter(*p, Arc::clone(&api)))
            .collect())
    }

    /// Build on top of an existing `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `Config` if the token is not a valid header value.
    pub fn with_client(
        provider: Provider,
        client: reqwest::Client,
        config: &ProviderConfig,
    ) -> Result<Self, ReelError> {
        let api = RealAdapter::with_client(client, config)?;
        Ok(Self::from_adapter(provider, Arc::new(api)))
    }

    /// Build from an arbitrary adapter. Tests use this with `<dyn MoviesApi>::from_fns`.
    #[must_use]
    pub fn from_adapter(provider: Provider, api: Arc<dyn MoviesApi>) -> Self {
        Self { provider, api }
    }
}

#[async_trait]
impl ReelConnector for HttpConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Movie API"
    }

    fn provider(&self) -> Provider {
        self.provider
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }

    fn as_detail_provider(&self) -> Option<&dyn DetailProvider> {
        Some(self as &dyn DetailProvider)
    }
}

#[async_trait]
impl CatalogProvider for HttpConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "reelprice_http::catalog",
            skip(self),
            fields(provider = %self.provider),
        )
    )]
    async fn catalog(&self) -> Result<Vec<MovieRecord>, ReelError> {
        let raw = self.api.movies(self.provider).await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(count = raw.len(), "catalog listed");
        Ok(raw.into_iter().map(|m| m.tagged(self.provider)).collect())
    }
}

#[async_trait]
impl DetailProvider for HttpConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "reelprice_http::detail",
            skip(self),
            fields(provider = %self.provider),
        )
    )]
    async fn detail(&self, id: &str) -> Result<MovieDetail, ReelError> {
        let raw = self.api.movie(self.provider, id).await?;
        Ok(raw.tagged_detail(self.provider))
    }
}
