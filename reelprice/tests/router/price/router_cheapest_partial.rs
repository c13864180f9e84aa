use reelprice::{
    Capability, MovieDetail, Provider, ReelConfig, ReelError, RetryPolicy, RetryStop,
};

use crate::helpers::{MockConnector, m_offers, record, reel_with};

fn bounded() -> ReelConfig {
    let mut cfg = ReelConfig::interactive();
    cfg.retry = RetryPolicy {
        stop: RetryStop::MaxAttempts(2),
        ..Default::default()
    };
    cfg
}

#[tokio::test(start_paused = true)]
async fn failed_detail_is_skipped() {
    let cw = MockConnector::builder()
        .name("cw")
        .provider(Provider::Cinemaworld)
        .movie("cw1", "Arrival", Some("3.5"))
        .detail_fails("cw1", ReelError::transport(Provider::Cinemaworld, "reset"))
        .build();
    let fw = m_offers(Provider::Filmworld, &[("fw1", "Arrival", "11")]);
    let reel = reel_with(&[cw, fw], bounded());

    let index = reel.build_index().await.unwrap();
    let best = reel.cheapest("arrival", &index).await.unwrap();
    assert_eq!(best.provider, Provider::Filmworld);
    assert_eq!(best.price.as_str(), "11");
}

#[tokio::test]
async fn offer_without_price_is_skipped() {
    let cw = MockConnector::builder()
        .provider(Provider::Cinemaworld)
        .movie("cw1", "Arrival", None)
        .build();
    let fw = MockConnector::builder()
        .provider(Provider::Filmworld)
        .movie("fw1", "Arrival", Some("not a number"))
        .build();

    let reel = reel_with(&[cw, fw], ReelConfig::interactive());
    let index = reel.build_index().await.unwrap();
    let err = reel.cheapest("arrival", &index).await.unwrap_err();
    assert!(err.is_not_found(), "{err:?}");
}

#[tokio::test]
async fn fatal_detail_error_propagates() {
    let cw = MockConnector::builder()
        .provider(Provider::Cinemaworld)
        .movie("cw1", "Heat", Some("1"))
        .detail_fails("cw1", ReelError::Config("bad token".into()))
        .build();
    let fw = m_offers(Provider::Filmworld, &[("fw1", "Heat", "11")]);
    let reel = reel_with(&[cw, fw], ReelConfig::served());

    let index = reel.build_index().await.unwrap();
    let err = reel.cheapest("heat", &index).await.unwrap_err();
    assert_eq!(err, ReelError::Config("bad token".into()));
}

#[tokio::test(start_paused = true)]
async fn exhausted_detail_is_an_outage_not_a_miss() {
    let cw = MockConnector::builder()
        .provider(Provider::Cinemaworld)
        .movie("cw1", "Heat", Some("1"))
        .detail_fails(
            "cw1",
            ReelError::transport(Provider::Cinemaworld, "connection refused"),
        )
        .build();
    let reel = reel_with(&[cw], ReelConfig::served());

    let index = reel.build_index().await.unwrap();
    let err = reel.cheapest("heat", &index).await.unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(
        err,
        ReelError::RetriesExhausted {
            capability: Capability::Detail,
            attempts: 5,
            last: Box::new(ReelError::transport(
                Provider::Cinemaworld,
                "connection refused"
            )),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn every_detail_failing_collapses_the_failures() {
    let cw = MockConnector::builder()
        .provider(Provider::Cinemaworld)
        .movie("cw1", "Arrival", Some("1"))
        .detail_fails("cw1", ReelError::transport(Provider::Cinemaworld, "reset"))
        .build();
    let fw = MockConnector::builder()
        .provider(Provider::Filmworld)
        .movie("fw1", "Arrival", Some("2"))
        .detail_fails(
            "fw1",
            ReelError::Status {
                provider: Provider::Filmworld,
                status: 502,
            },
        )
        .build();
    let reel = reel_with(&[cw, fw], bounded());
    let index = reel.build_index().await.unwrap();

    let err = reel.cheapest("ARRIVAL", &index).await.unwrap_err();
    match err {
        ReelError::AllProvidersFailed(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(
                errors
                    .iter()
                    .all(|e| matches!(e, ReelError::RetriesExhausted { attempts: 2, .. }))
            );
        }
        other => panic!("unexpected: {other:?}"),
    }

    let err = reel.offers("arrival", &index).await.unwrap_err();
    assert!(matches!(err, ReelError::AllProvidersFailed(_)), "{err:?}");
}

#[tokio::test(start_paused = true)]
async fn failure_beside_an_unpriced_offer_is_reported() {
    let cw = MockConnector::builder()
        .provider(Provider::Cinemaworld)
        .movie("cw1", "Arrival", None)
        .build();
    let fw = MockConnector::builder()
        .provider(Provider::Filmworld)
        .movie("fw1", "Arrival", Some("2"))
        .detail_fails("fw1", ReelError::transport(Provider::Filmworld, "reset"))
        .build();
    let reel = reel_with(&[cw, fw], bounded());
    let index = reel.build_index().await.unwrap();

    let err = reel.cheapest("arrival", &index).await.unwrap_err();
    assert!(
        matches!(err, ReelError::RetriesExhausted { capability: Capability::Detail, .. }),
        "{err:?}"
    );
}

#[tokio::test]
async fn detail_provider_tag_comes_from_the_record() {
    let fw = MockConnector::builder()
        .provider(Provider::Filmworld)
        .movie("fw1", "Arrival", Some("9"))
        .with_detail_fn(|id| {
            let mut movie = record(Provider::Filmworld, id, "Arrival");
            movie.price = Some("9".into());
            Ok(MovieDetail {
                movie,
                attributes: Default::default(),
            })
        })
        .build();
    let reel = reel_with(&[fw], ReelConfig::interactive());
    let index = reel.build_index().await.unwrap();
    let best = reel.cheapest("arrival", &index).await.unwrap();
    assert_eq!(best.provider, Provider::Filmworld);
    assert_eq!(best.id, "fw1");
}
