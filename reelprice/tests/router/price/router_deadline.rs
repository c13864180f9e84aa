use std::time::Duration;

use reelprice::{Capability, Provider, ReelConfig, ReelError};
use reelprice_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{MockConnector, record, reel_with};

#[tokio::test(start_paused = true)]
async fn unreachable_providers_hit_the_request_deadline() {
    let (cw, cw_ctl) = DynamicMockConnector::new_with_controller("cw", Provider::Cinemaworld);
    cw_ctl.set_catalog_behavior(MockBehavior::Hang).await;
    let (fw, fw_ctl) = DynamicMockConnector::new_with_controller("fw", Provider::Filmworld);
    fw_ctl
        .set_catalog_behavior(MockBehavior::Fail(ReelError::transport(
            Provider::Filmworld,
            "connection refused",
        )))
        .await;

    let reel = reel_with(&[cw, fw], ReelConfig::served());
    let start = tokio::time::Instant::now();
    let err = reel.build_index().await.unwrap_err();

    assert_eq!(err, ReelError::request_timeout(Capability::Index));
    assert_eq!(start.elapsed(), Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn interactive_preset_waits_out_a_long_outage() {
    let (cw, ctl) = DynamicMockConnector::new_with_controller("cw", Provider::Cinemaworld);
    ctl.set_catalog_behavior(MockBehavior::fail_times(
        10,
        ReelError::transport(Provider::Cinemaworld, "connection refused"),
        MockBehavior::Return(vec![record(Provider::Cinemaworld, "cw1", "Heat")]),
    ))
    .await;

    let reel = reel_with(&[cw], ReelConfig::interactive());
    let index = reel.build_index().await.unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(ctl.calls().await.len(), 11);
}

#[tokio::test(start_paused = true)]
async fn slow_details_hit_the_request_deadline() {
    let cw = MockConnector::builder()
        .provider(Provider::Cinemaworld)
        .movie("cw1", "Heat", Some("4"))
        .detail_delay(2_000)
        .build();
    let mut cfg = ReelConfig::interactive();
    cfg.provider_timeout = Duration::from_secs(10);
    cfg.request_timeout = Some(Duration::from_secs(1));
    let reel = reel_with(&[cw], cfg);

    let index = reel.build_index().await.unwrap();
    let err = reel.cheapest("heat", &index).await.unwrap_err();
    assert_eq!(err, ReelError::request_timeout(Capability::Cheapest));
}

#[tokio::test(start_paused = true)]
async fn one_deadline_covers_index_and_price() {
    let cw = MockConnector::builder()
        .provider(Provider::Cinemaworld)
        .movie("cw1", "Heat", Some("4"))
        .catalog_delay(4_000)
        .detail_delay(4_000)
        .build();
    let mut cfg = ReelConfig::served();
    cfg.provider_timeout = Duration::from_secs(10);
    cfg.request_timeout = Some(Duration::from_secs(5));
    let reel = reel_with(&[cw], cfg);

    let start = tokio::time::Instant::now();
    let err = reel.cheapest_price("heat").await.unwrap_err();
    assert_eq!(err, ReelError::request_timeout(Capability::Cheapest));
    assert_eq!(start.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn cheapest_price_within_the_deadline() {
    let cw = MockConnector::builder()
        .provider(Provider::Cinemaworld)
        .movie("cw1", "Heat", Some("4"))
        .catalog_delay(2_000)
        .detail_delay(2_000)
        .build();
    let mut cfg = ReelConfig::served();
    cfg.request_timeout = Some(Duration::from_secs(5));
    let reel = reel_with(&[cw], cfg);

    let best = reel.cheapest_price("  HEAT ").await.unwrap();
    assert_eq!(best.price.as_str(), "4");
}
