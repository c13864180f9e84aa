use reelprice::{CatalogPolicy, Provider, ReelConfig, ReelError, RetryPolicy, RetryStop};

use crate::helpers::{MockConnector, reel_with};

fn once() -> RetryPolicy {
    RetryPolicy {
        stop: RetryStop::MaxAttempts(1),
        ..Default::default()
    }
}

fn connectors(fw_error: Option<ReelError>) -> Vec<std::sync::Arc<dyn reelprice::ReelConnector>> {
    let cw = MockConnector::builder()
        .name("cw")
        .provider(Provider::Cinemaworld)
        .movie("cw1", "Alien", Some("3"))
        .build();
    let mut fw = MockConnector::builder()
        .name("fw")
        .provider(Provider::Filmworld)
        .movie("fw1", "Aliens", Some("4"));
    if let Some(e) = fw_error {
        fw = fw.catalog_fails(e);
    }
    vec![cw, fw.build()]
}

#[tokio::test]
async fn require_all_surfaces_a_single_provider_failure() {
    let mut cfg = ReelConfig::interactive();
    cfg.retry = once();
    cfg.catalog_policy = CatalogPolicy::RequireAll;
    let reel = reel_with(
        &connectors(Some(ReelError::Config("token rejected".into()))),
        cfg,
    );

    let err = reel.build_index().await.unwrap_err();
    assert_eq!(err, ReelError::Config("token rejected".into()));
}

#[tokio::test]
async fn allow_partial_drops_failed_provider() {
    let mut cfg = ReelConfig::served();
    cfg.retry = once();
    let reel = reel_with(
        &connectors(Some(ReelError::Status {
            provider: Provider::Filmworld,
            status: 500,
        })),
        cfg,
    );

    let index = reel.build_index().await.unwrap();
    assert_eq!(index.len(), 1);
    assert!(index.get("alien").is_some());
    assert!(index.get("aliens").is_none());
}

#[tokio::test]
async fn allow_partial_fails_when_every_provider_fails() {
    let cw = MockConnector::builder()
        .provider(Provider::Cinemaworld)
        .catalog_fails(ReelError::Other("down".into()))
        .build();
    let fw = MockConnector::builder()
        .provider(Provider::Filmworld)
        .catalog_fails(ReelError::Config("bad".into()))
        .build();
    let mut cfg = ReelConfig::served();
    cfg.retry = once();
    let reel = reel_with(&[cw, fw], cfg);

    match reel.build_index().await.unwrap_err() {
        ReelError::AllProvidersFailed(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(matches!(errors[0], ReelError::Connector { .. }));
            assert_eq!(errors[1], ReelError::Config("bad".into()));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn transient_failure_exhausts_retries_under_bounded_policy() {
    let mut cfg = ReelConfig::interactive();
    cfg.retry.stop = RetryStop::MaxAttempts(2);
    let reel = reel_with(
        &connectors(Some(ReelError::transport(Provider::Filmworld, "reset"))),
        cfg,
    );

    match reel.build_index().await.unwrap_err() {
        ReelError::RetriesExhausted {
            attempts, last, ..
        } => {
            assert_eq!(attempts, 2);
            assert_eq!(*last, ReelError::transport(Provider::Filmworld, "reset"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}
