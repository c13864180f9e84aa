use async_trait::async_trait;

use crate::types::{MovieDetail, MovieRecord};
use crate::{Provider, ReelError};

/// Focused role trait for connectors that list a provider's catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch every movie the provider lists, without prices, in catalog order.
    ///
    /// Each returned record must carry this connector's provider tag.
    async fn catalog(&self) -> Result<Vec<MovieRecord>, ReelError>;
}

/// Focused role trait for connectors that fetch a single movie with its price.
#[async_trait]
pub trait DetailProvider: Send + Sync {
    /// Fetch the full record for `id`.
    ///
    /// A record whose price is missing is still a successful fetch; callers
    /// decide what to do with it.
    async fn detail(&self, id: &str) -> Result<MovieDetail, ReelError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
///
/// A connector speaks for exactly one [`Provider`].
#[async_trait]
pub trait ReelConnector: Send + Sync {
    /// A stable identifier for logs and error tagging (e.g., "reelprice-http").
    fn name(&self) -> &'static str;

    /// The upstream provider this connector talks to.
    fn provider(&self) -> Provider;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise catalog capability by returning a usable trait object reference when supported.
    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        None
    }

    /// Advertise detail capability by returning a usable trait object reference when supported.
    fn as_detail_provider(&self) -> Option<&dyn DetailProvider> {
        None
    }
}
