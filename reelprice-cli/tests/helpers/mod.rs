#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use reelprice::{
    BackoffConfig, MovieRecord, Provider, Reel, ReelConfig, ReelConnector, RetryPolicy, RetryStop,
};
use reelprice_mock::MockConnector;
use tokio::net::TcpListener;

/// Orchestrator over both fixture catalogues.
pub fn fixture_reel(cfg: ReelConfig) -> Reel {
    let cw: Arc<dyn ReelConnector> = Arc::new(MockConnector::cinemaworld());
    let fw: Arc<dyn ReelConnector> = Arc::new(MockConnector::filmworld());
    reel_with(&[cw, fw], cfg)
}

pub fn reel_with(connectors: &[Arc<dyn ReelConnector>], cfg: ReelConfig) -> Reel {
    connectors
        .iter()
        .fold(Reel::builder().config(cfg), |b, c| b.with_connector(Arc::clone(c)))
        .build()
        .expect("valid connectors")
}

/// Serve `reel` on an ephemeral local port and return its base URL.
pub async fn spawn_server(reel: Reel) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(reelprice_cli::server::serve(listener, Arc::new(reel)));
    format!("http://{addr}")
}

/// Catalog-style record (no price).
pub fn record(provider: Provider, id: &str, title: &str) -> MovieRecord {
    MovieRecord {
        id: id.to_string(),
        title: title.to_string(),
        year: "1995".to_string(),
        kind: "movie".to_string(),
        poster: String::new(),
        price: None,
        provider,
    }
}

/// Served preset with millisecond backoff so outages surface quickly.
pub fn fast_served() -> ReelConfig {
    let mut cfg = ReelConfig::served();
    cfg.retry = RetryPolicy {
        backoff: BackoffConfig {
            initial_delay_ms: 1,
            max_delay_ms: Some(5),
            ..BackoffConfig::default()
        },
        stop: RetryStop::MaxAttempts(2),
    };
    cfg
}
