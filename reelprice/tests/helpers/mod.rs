#![allow(dead_code)]


pub use mock_connector::{MockConnector, m_offers};

use std::sync::Arc;

use reelprice::{MovieRecord, Provider, Reel, ReelConfig, ReelConnector};
use reelprice_mock::MockConnector as FixtureConnector;

/// Build a catalog-style record (no price).
pub fn record(provider: Provider, id: &str, title: &str) -> MovieRecord {
    MovieRecord {
        id: id.to_string(),
        title: title.to_string(),
        year: "1983".to_string(),
        kind: "movie".to_string(),
        poster: String::new(),
        price: None,
        provider,
    }
}

/// Orchestrator over both fixture catalogues with the given configuration.
pub fn fixture_reel(cfg: ReelConfig) -> Reel {
    let cw: Arc<dyn ReelConnector> = Arc::new(FixtureConnector::cinemaworld());
    let fw: Arc<dyn ReelConnector> = Arc::new(FixtureConnector::filmworld());
    Reel::builder()
        .with_connector(fw)
        .with_connector(cw)
        .config(cfg)
        .build()
        .expect("two distinct providers")
}

/// Orchestrator over the given connectors with the given configuration.
pub fn reel_with(connectors: &[Arc<dyn ReelConnector>], cfg: ReelConfig) -> Reel {
    connectors
        .iter()
        .fold(Reel::builder().config(cfg), |b, c| b.with_connector(Arc::clone(c)))
        .build()
        .expect("valid connectors")
}
