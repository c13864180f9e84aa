use std::collections::BTreeMap;

use reelprice_core::{MovieDetail, MovieRecord, Provider};
use serde_json::Value;

pub struct Fixture {
    pub id: &'static str,
    pub title: &'static str,
    pub year: &'static str,
    pub price: &'static str,
    pub director: &'static str,
    pub rated: &'static str,
}

const POSTER_BASE: &str = "https://posters.reelprice.invalid";

pub const CINEMAWORLD: &[Fixture] = &[
    Fixture {
        id: "cw0076759",
        title: "Star Wars: Episode IV - A New Hope",
        year: "1977",
        price: "123.5",
        director: "George Lucas",
        rated: "PG",
    },
    Fixture {
        id: "cw0080684",
        title: "Star Wars: Episode V - The Empire Strikes Back",
        year: "1980",
        price: "13.5",
        director: "Irvin Kershner",
        rated: "PG",
    },
    Fixture {
        id: "cw0086190",
        title: "Star Wars: Episode VI - Return of the Jedi",
        year: "1983",
        price: "123.5",
        director: "Richard Marquand",
        rated: "PG",
    },
    Fixture {
        id: "cw0120915",
        title: "Star Wars: Episode I - The Phantom Menace",
        year: "1999",
        price: "900.5",
        director: "George Lucas",
        rated: "PG",
    },
    Fixture {
        id: "cw0121765",
        title: "Star Wars: Episode II - Attack of the Clones",
        year: "2002",
        price: "12.5",
        director: "George Lucas",
        rated: "PG",
    },
    Fixture {
        id: "cw0121766",
        title: "Star Wars: Episode III - Revenge of the Sith",
        year: "2005",
        price: "125.5",
        director: "George Lucas",
        rated: "PG-13",
    },
];

pub const FILMWORLD: &[Fixture] = &[
    Fixture {
        id: "fw2488496",
        title: "Star Wars: The Force Awakens",
        year: "2015",
        price: "129.5",
        director: "J.J. Abrams",
        rated: "PG-13",
    },
    Fixture {
        id: "fw0076759",
        title: "Star Wars: Episode IV - A New Hope",
        year: "1977",
        price: "29.5",
        director: "George Lucas",
        rated: "PG",
    },
    Fixture {
        id: "fw0080684",
        title: "Star Wars: Episode V - The Empire Strikes Back",
        year: "1980",
        price: "1295.0",
        director: "Irvin Kershner",
        rated: "PG",
    },
    Fixture {
        id: "fw0086190",
        title: "Star Wars: Episode VI - Return of the Jedi",
        year: "1983",
        price: "69.5",
        director: "Richard Marquand",
        rated: "PG",
    },
    Fixture {
        id: "fw0120915",
        title: "Star Wars: Episode I - The Phantom Menace",
        year: "1999",
        price: "1200.5",
        director: "George Lucas",
        rated: "PG",
    },
    Fixture {
        id: "fw0121765",
        title: "Star Wars: Episode II - Attack of the Clones",
        year: "2002",
        price: "1200.5",
        director: "George Lucas",
        rated: "PG",
    },
];

pub const fn for_provider(provider: Provider) -> &'static [Fixture] {
    match provider {
        Provider::Cinemaworld => CINEMAWORLD,
        Provider::Filmworld => FILMWORLD,
    }
}

impl Fixture {
    pub fn record(&self, provider: Provider) -> MovieRecord {
        MovieRecord {
            id: self.id.to_string(),
            title: self.title.to_string(),
            year: self.year.to_string(),
            kind: "movie".to_string(),
            poster: format!("{POSTER_BASE}/{}.jpg", self.id),
            price: None,
            provider,
        }
    }

    pub fn detail(&self, provider: Provider) -> MovieDetail {
        let mut movie = self.record(provider);
        movie.price = Some(self.price.to_string());
        let attributes = BTreeMap::from([
            ("Director".to_string(), Value::from(self.director)),
            ("Rated".to_string(), Value::from(self.rated)),
            ("Language".to_string(), Value::from("English")),
        ]);
        MovieDetail { movie, attributes }
    }
}
