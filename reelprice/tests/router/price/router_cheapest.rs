use reelprice::{Provider, ReelConfig, ReelError};

use crate::helpers::{fixture_reel, m_offers, reel_with};

#[tokio::test]
async fn title_listed_by_both_providers_resolves_lowest() {
    let reel = fixture_reel(ReelConfig::interactive());
    let index = reel.build_index().await.unwrap();

    let best = reel
        .cheapest("Star Wars: Episode VI - Return of the Jedi", &index)
        .await
        .unwrap();
    assert_eq!(best.price.as_str(), "69.5");
    assert_eq!(best.provider, Provider::Filmworld);
    assert_eq!(best.id, "fw0086190");
}

#[tokio::test]
async fn title_listed_by_one_provider_resolves_its_price() {
    let reel = fixture_reel(ReelConfig::interactive());
    let index = reel.build_index().await.unwrap();

    let best = reel
        .cheapest("Star Wars: The Force Awakens", &index)
        .await
        .unwrap();
    assert_eq!(best.price.as_str(), "129.5");
}

#[tokio::test]
async fn lookup_ignores_case_and_surrounding_whitespace() {
    let reel = fixture_reel(ReelConfig::interactive());
    let index = reel.build_index().await.unwrap();

    for q in [
        "star wars: episode vi - return of the jedi",
        "STAR WARS: EPISODE VI - RETURN OF THE JEDI",
        "   Star Wars: Episode VI - Return of the Jedi \t ",
    ] {
        let best = reel.cheapest(q, &index).await.unwrap();
        assert_eq!(best.price.as_str(), "69.5", "query {q:?}");
    }
}

#[tokio::test]
async fn absent_and_internally_spaced_titles_are_not_found() {
    let reel = fixture_reel(ReelConfig::interactive());
    let index = reel.build_index().await.unwrap();

    for q in [
        "Only Star Wars",
        "Star Wars:  Episode VI - Return of the Jedi",
        "Star Wars: Episode VI  -  Return of the Jedi",
        "",
    ] {
        let err = reel.cheapest(q, &index).await.unwrap_err();
        assert!(err.is_not_found(), "query {q:?} gave {err:?}");
    }
}

#[tokio::test]
async fn prices_compare_numerically() {
    let reel = reel_with(
        &[
            m_offers(Provider::Cinemaworld, &[("cw1", "Dune", "900.5")]),
            m_offers(Provider::Filmworld, &[("fw1", "Dune", "129.5")]),
        ],
        ReelConfig::interactive(),
    );
    let index = reel.build_index().await.unwrap();
    let best = reel.cheapest("dune", &index).await.unwrap();
    assert_eq!(best.price.as_str(), "129.5");
    assert_eq!(best.provider, Provider::Filmworld);

    let reel = fixture_reel(ReelConfig::interactive());
    let index = reel.build_index().await.unwrap();
    let phantom = reel
        .cheapest("Star Wars: Episode I - The Phantom Menace", &index)
        .await
        .unwrap();
    assert_eq!(phantom.price.as_str(), "900.5");
}

#[tokio::test]
async fn ties_keep_provider_precedence_and_original_text() {
    let reel = reel_with(
        &[
            m_offers(Provider::Filmworld, &[("fw1", "Tenet", "10.0")]),
            m_offers(Provider::Cinemaworld, &[("cw1", "Tenet", "10")]),
        ],
        ReelConfig::interactive(),
    );
    let index = reel.build_index().await.unwrap();
    let best = reel.cheapest("tenet", &index).await.unwrap();
    assert_eq!(best.provider, Provider::Cinemaworld);
    assert_eq!(best.price.to_string(), "10");
}

#[tokio::test]
async fn duplicate_titles_within_one_provider_all_compete() {
    let reel = reel_with(
        &[m_offers(
            Provider::Cinemaworld,
            &[("cw1", "Solaris", "12"), ("cw2", "SOLARIS", "7.25")],
        )],
        ReelConfig::interactive(),
    );
    let index = reel.build_index().await.unwrap();
    let best = reel.cheapest("solaris", &index).await.unwrap();
    assert_eq!(best.id, "cw2");
}

#[tokio::test]
async fn offers_returns_every_provider_detail() {
    let reel = fixture_reel(ReelConfig::interactive());
    let index = reel.build_index().await.unwrap();
    let offers = reel
        .offers("star wars: episode iv - a new hope", &index)
        .await
        .unwrap();
    let providers: Vec<Provider> = offers.iter().map(|d| d.movie.provider).collect();
    assert_eq!(providers, [Provider::Cinemaworld, Provider::Filmworld]);
    assert!(offers.iter().all(|d| d.attributes.contains_key("Director")));

    let err = reel.offers("nope", &index).await.unwrap_err();
    assert!(matches!(err, ReelError::NotFound { .. }));
}
