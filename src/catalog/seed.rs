//! Seed rows and the built-in theater/movie table.

use super::{Location, Theater};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TheaterSeed {
    pub code: String,
    pub name: String,
    pub city: String,
    pub state: String,
}

impl TheaterSeed {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self { code: code.into(), name: name.into(), city: city.into(), state: state.into() }
    }

    pub(crate) fn into_theater(self) -> Theater {
        Theater { name: self.name, code: self.code, location: Location { city: self.city, state: self.state } }
    }
}

/// A movie before showings are generated.
///
/// `rating` and `theaters` stay `None` until set; the catalog fills in
/// [`DEFAULT_RATING`](super::DEFAULT_RATING) and "no theaters".
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSeed {
    pub name: String,
    pub genres: Vec<String>,
    pub rating: Option<f32>,
    pub theaters: Option<Vec<String>>,
}

impl MovieSeed {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), genres: Vec::new(), rating: None, theaters: None }
    }

    pub fn genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn theaters<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.theaters = Some(codes.into_iter().map(Into::into).collect());
        self
    }
}

pub fn standard_theaters() -> Vec<TheaterSeed> {
    vec![
        TheaterSeed::new("RLC10", "REGAL LLOYD CENTER 10", "Portland", "Oregon"),
        TheaterSeed::new("RM16", "Regal Meridian 16", "Seattle", "Washington"),
        TheaterSeed::new("AMC8", "AMC SHOWPLACE CARBONDALE 8", "Carbondale", "Illinois"),
        TheaterSeed::new("OHC", "O'Hare Cinema", "Chicago", "Illinois"),
    ]
}

pub fn standard_movies() -> Vec<MovieSeed> {
    vec![
        MovieSeed::new("Star Wars").genres(["SciFi"]).rating(4.6).theaters(["RLC10", "RM16"]),
        MovieSeed::new("Zoolander 2").genres(["Comedy", "NewRelease"]).rating(2.4).theaters(["RM16", "AMC8", "OHC"]),
        MovieSeed::new("The Other Side of the Door").genres(["Thriller", "Horror"]).rating(3.0).theaters(["AMC8"]),
        MovieSeed::new("The Witch").genres(["Thriller", "Horror"]).rating(3.6).theaters(["RLC10", "OHC"]),
        MovieSeed::new("The Boy").genres(["Thriller"]).rating(2.9).theaters(["RLC10", "RM16", "AMC8"]),
        MovieSeed::new("Deadpool")
            .genres(["Action", "Comedy", "NewRelease"])
            .rating(4.3)
            .theaters(["RLC10", "RM16", "AMC8", "OHC"]),
        MovieSeed::new("London Has Fallen").genres(["Action", "NewRelease"]).rating(2.8).theaters(["RM16"]),
        MovieSeed::new("The Revenant").genres(["Action", "Drama"]).rating(4.0).theaters(["RLC10", "AMC8"]),
        MovieSeed::new("Kung Fu Panda 3").genres(["Animation", "Family"]).theaters(["OHC"]),
        MovieSeed::new("Hail, Caesar!").genres(["Comedy"]).rating(3.1),
    ]
}
