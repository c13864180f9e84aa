//! Mock reelprice connectors for tests and offline demos.
//!
//! [`MockConnector`] serves a fixed Star Wars catalogue per provider.
//! [`DynamicMockConnector`] defers every call to a controller so tests can
//! script failures, hangs, and recoveries.
use async_trait::async_trait;
use reelprice_core::connector::{CatalogProvider, DetailProvider, ReelConnector};
use reelprice_core::{MovieDetail, MovieRecord, Provider, ReelError};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior, MockCall};

/// Mock connector for CI-safe demos. Provides deterministic data from static fixtures.
///
/// Prices are chosen so that a lexical comparison would pick the wrong
/// winner for several titles, and "Star Wars: The Force Awakens" is only
/// listed by filmworld.
pub struct MockConnector {
    provider: Provider,
}

impl MockConnector {
    /// Mock for `provider`.
    #[must_use]
    pub const fn new(provider: Provider) -> Self {
        Self { provider }
    }

    /// Mock cinemaworld catalogue.
    #[must_use]
    pub const fn cinemaworld() -> Self {
        Self::new(Provider::Cinemaworld)
    }

    /// Mock filmworld catalogue.
    #[must_use]
    pub const fn filmworld() -> Self {
        Self::new(Provider::Filmworld)
    }
}

#[async_trait]
impl ReelConnector for MockConnector {
    fn name(&self) -> &'static str {
        "reelprice-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
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
impl CatalogProvider for MockConnector {
    async fn catalog(&self) -> Result<Vec<MovieRecord>, ReelError> {
        Ok(fixtures::for_provider(self.provider)
            .iter()
            .map(|f| f.record(self.provider))
            .collect())
    }
}

#[async_trait]
impl DetailProvider for MockConnector {
    async fn detail(&self, id: &str) -> Result<MovieDetail, ReelError> {
        fixtures::for_provider(self.provider)
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.detail(self.provider))
            .ok_or_else(|| ReelError::not_found(format!("{} movie {id}", self.provider)))
    }
}
