use std::sync::Arc;
use std::time::Duration;

use reelprice::{ProviderConfig, Reel, ReelConfig, ReelError};
use reelprice_http::HttpConnector;

/// Orchestrator for the interactive menu: unbounded retries, short provider timeout.
///
/// # Errors
/// Returns `Config` for an unusable base URL or token.
pub fn interactive_reel(api_url: &str, token: &str, timeout: Duration) -> Result<Reel, ReelError> {
    let mut cfg = ReelConfig::interactive();
    cfg.provider_timeout = timeout;
    http_reel(api_url, token, cfg)
}

/// Orchestrator for the HTTP server: bounded retries, partial catalogs, request deadline.
///
/// # Errors
/// Returns `Config` for an unusable base URL or token.
pub fn served_reel(api_url: &str, token: &str, deadline: Duration) -> Result<Reel, ReelError> {
    let mut cfg = ReelConfig::served();
    cfg.request_timeout = Some(deadline);
    http_reel(api_url, token, cfg)
}

fn http_reel(api_url: &str, token: &str, cfg: ReelConfig) -> Result<Reel, ReelError> {
    let provider_cfg = ProviderConfig::new(api_url, token)?;
    HttpConnector::pair(&provider_cfg)?
        .into_iter()
        .fold(Reel::builder().config(cfg), |b, c| b.with_connector(Arc::new(c)))
        .build()
}
