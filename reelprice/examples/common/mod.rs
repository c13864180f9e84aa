use std::sync::Arc;

use reelprice::{ProviderConfig, ReelConnector};

/// Both providers: live HTTP when `API_URL_BASE` and `API_TOKEN` are set and
/// `REELPRICE_EXAMPLES_USE_MOCK` is not, fixture mocks otherwise.
#[must_use]
pub fn get_connectors() -> Vec<Arc<dyn ReelConnector>> {
    let live = match (std::env::var("API_URL_BASE"), std::env::var("API_TOKEN")) {
        (Ok(url), Ok(token)) if std::env::var("REELPRICE_EXAMPLES_USE_MOCK").is_err() => {
            ProviderConfig::new(&url, token)
                .and_then(|cfg| reelprice_http::HttpConnector::pair(&cfg))
                .ok()
        }
        _ => None,
    };
    match live {
        Some(pair) => pair
            .into_iter()
            .map(|c| Arc::new(c) as Arc<dyn ReelConnector>)
            .collect(),
        None => {
            println!("--- (Using Mock Connectors) ---");
            vec![
                Arc::new(reelprice_mock::MockConnector::cinemaworld()),
                Arc::new(reelprice_mock::MockConnector::filmworld()),
            ]
        }
    }
}
