//! Catalog store: theaters, movies and their generated showings.
//!
//! A [`Catalog`] is built once from seed rows and never mutated afterwards.
//! Callers either build their own and pass it by reference, or use the
//! process-wide instance from [`shared`], which is built on first access.
//!
//! Every (movie, theater) pair gets the same showtime grid: seven days from
//! `today`, every even hour from 10 to 24. The 24 o'clock showing lands on
//! midnight of the following day.

#[path = "catalog/seed.rs"]
mod seed;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use tracing::info;

use crate::Context;
use crate::error::{Error, Result};

pub use seed::{MovieSeed, TheaterSeed, standard_movies, standard_theaters};

/// Rating applied to movies whose seed leaves it unspecified.
pub const DEFAULT_RATING: f32 = 2.5;

pub const LOOKAHEAD_DAYS: u64 = 7;
pub const FIRST_SHOW_HOUR: i64 = 10;
pub const LAST_SHOW_HOUR: i64 = 24;
pub const SHOW_INTERVAL_HOURS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theater {
    pub name: String,
    /// Short identifier, e.g. `RM16`.
    pub code: String,
    pub location: Location,
}

/// One theater's full showtime list for one movie.
#[derive(Debug, Clone, PartialEq)]
pub struct Showing {
    pub theater: Theater,
    pub times: Vec<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub name: String,
    pub genres: Vec<String>,
    pub rating: f32,
    /// Codes of the theaters this movie plays at; empty for unscheduled movies.
    pub theaters: Vec<String>,
    pub showings: Vec<Showing>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    today: NaiveDate,
    theaters: Vec<Theater>,
    movies: Vec<Movie>,
}

impl Catalog {
    /// Build a catalog from seed rows, generating showtimes from `today`.
    ///
    /// Fails on duplicate theater codes, movies referencing unknown theaters,
    /// empty movie names, or a window that overflows the calendar. Nothing is
    /// returned on failure.
    pub fn build(today: NaiveDate, theaters: Vec<TheaterSeed>, movies: Vec<MovieSeed>) -> Result<Self> {
        let mut codes = HashSet::new();
        let theaters: Vec<Theater> = theaters
            .into_iter()
            .map(|seed| {
                if !codes.insert(seed.code.clone()) {
                    return Err(Error::DuplicateTheater(seed.code));
                }
                Ok(seed.into_theater())
            })
            .collect::<Result<_>>()?;

        let times = showtimes(today)?;

        let movies = movies
            .into_iter()
            .enumerate()
            .map(|(idx, seed)| {
                if seed.name.trim().is_empty() {
                    return Err(Error::EmptyMovieName(idx));
                }
                let codes = seed.theaters.unwrap_or_default();
                let showings = codes
                    .iter()
                    .map(|code| {
                        let theater = theaters.iter().find(|t| &t.code == code).ok_or_else(|| {
                            Error::UnknownTheater { movie: seed.name.clone(), code: code.clone() }
                        })?;
                        Ok(Showing { theater: theater.clone(), times: times.clone() })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(Movie {
                    name: seed.name,
                    genres: seed.genres,
                    rating: seed.rating.unwrap_or(DEFAULT_RATING),
                    theaters: codes,
                    showings,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(%today, theaters = theaters.len(), movies = movies.len(), "catalog built");
        Ok(Catalog { today, theaters, movies })
    }

    /// The built-in theater and movie table.
    pub fn standard(today: NaiveDate) -> Result<Self> {
        Self::build(today, standard_theaters(), standard_movies())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn theaters(&self) -> &[Theater] {
        &self.theaters
    }

    pub fn theater(&self, code: &str) -> Option<&Theater> {
        self.theaters.iter().find(|t| t.code == code)
    }

    pub fn movie(&self, name: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.name == name)
    }
}

static SHARED: OnceCell<Catalog> = OnceCell::new();

/// The process-wide standard catalog, built on first access.
///
/// Concurrent first callers race on a single build; a failed build caches
/// nothing and is reported to every caller that hits it.
pub fn shared() -> Result<&'static Catalog> {
    SHARED.get_or_try_init(|| Catalog::standard(Context::default().today))
}

/// Movies of the shared catalog, in seed order.
pub fn movies() -> Result<&'static [Movie]> {
    shared().map(Catalog::movies)
}

/// Showtimes for one (movie, theater) pair starting at `today`.
pub fn showtimes(today: NaiveDate) -> Result<Vec<NaiveDateTime>> {
    let mut times = Vec::new();
    for offset in 0..LOOKAHEAD_DAYS {
        let day = today.checked_add_days(Days::new(offset)).ok_or(Error::DateOutOfRange(today))?;
        let midnight = day.and_time(NaiveTime::MIN);
        for hour in (FIRST_SHOW_HOUR..=LAST_SHOW_HOUR).step_by(SHOW_INTERVAL_HOURS) {
            let time = midnight.checked_add_signed(TimeDelta::hours(hour)).ok_or(Error::DateOutOfRange(today))?;
            times.push(time);
        }
    }
    Ok(times)
}
