//! Progressive filter engine and result classification.
//!
//! Narrowing runs top-down over three entity levels:
//!
//! ```text
//! Catalog::movies ── filter_movies (name, genre)          (movies.rs)
//!                        │
//!                        v
//!          per movie: filter_showings (city, state,       (showings.rs)
//!                        │          theater, range)
//!                        │   └─ filter_times (range) must keep ≥ 1 time
//!                        v
//!                 Vec<&Movie> with ≥ 1 surviving showing
//!                        │
//!                        v
//!                 classify ──▶ Classification             (classify.rs)
//! ```
//!
//! Every predicate is optional. An absent or empty criterion means "no
//! constraint", so adding a criterion can only shrink each level.
//!
//! ## Matching rules
//!
//! - Movie and theater names: case-insensitive, apostrophes stripped
//!   (`normalize.rs`). Theaters also match on their short code.
//! - Genre, city, state: case-insensitive exact match.
//! - Dates match on weekday only; times match on hour of day. The range's
//!   end date is carried but never filtered on.

#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/movies.rs"]
mod movies;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/showings.rs"]
mod showings;

pub use classify::{Classification, Pick, SHOWTIME_FORMAT, classify, format_showtime};
pub use movies::filter_movies;
pub use normalize::{normalize_name, present};
pub use showings::{filter_showings, filter_times};

use crate::catalog::{Catalog, Movie};
use crate::memory::{self, Memory};
use crate::moment::MomentRange;

/// Caller-supplied filter inputs for one resolution cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub movie_name: Option<String>,
    pub genre: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub theater_name: Option<String>,
    pub range: MomentRange,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movie_name(mut self, name: impl Into<String>) -> Self {
        self.movie_name = Some(name.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn theater(mut self, theater: impl Into<String>) -> Self {
        self.theater_name = Some(theater.into());
        self
    }

    pub fn range(mut self, range: MomentRange) -> Self {
        self.range = range;
        self
    }

    /// Read the filter slots. The range is supplied separately since it is
    /// stored encoded.
    pub fn from_memory(memory: &impl Memory, range: MomentRange) -> Self {
        Self {
            movie_name: memory.get_string(memory::FILTER_MOVIE_NAME),
            genre: memory.get_string(memory::FILTER_GENRE),
            city: memory.get_string(memory::FILTER_CITY),
            state: memory.get_string(memory::FILTER_STATE),
            theater_name: memory.get_string(memory::FILTER_THEATER),
            range,
        }
    }
}

/// Movies matching `criteria` that still have at least one showing.
pub fn find_movie_match<'a>(catalog: &'a Catalog, criteria: &Criteria) -> Vec<&'a Movie> {
    filter_movies(catalog.movies(), criteria.movie_name.as_deref(), criteria.genre.as_deref())
        .into_iter()
        .filter(|movie| {
            !filter_showings(
                movie,
                criteria.city.as_deref(),
                criteria.state.as_deref(),
                criteria.theater_name.as_deref(),
                &criteria.range,
            )
            .is_empty()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryValue, SlotMemory};
    use chrono::{NaiveDate, NaiveTime};

    fn catalog() -> Catalog {
        Catalog::standard(NaiveDate::from_ymd_opt(2013, 2, 12).unwrap()).unwrap()
    }

    fn names(movies: &[&Movie]) -> Vec<String> {
        movies.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn no_criteria_keeps_every_scheduled_movie() {
        let catalog = catalog();
        let found = find_movie_match(&catalog, &Criteria::new());
        assert_eq!(found.len(), 9);
        assert!(!names(&found).contains(&"Hail, Caesar!".to_string()));
    }

    #[test]
    fn location_filters_apply_to_theaters() {
        let catalog = catalog();
        let found = find_movie_match(&catalog, &Criteria::new().city("CARBONDALE"));
        assert_eq!(
            names(&found),
            vec!["Zoolander 2", "The Other Side of the Door", "The Boy", "Deadpool", "The Revenant"]
        );

        let found = find_movie_match(&catalog, &Criteria::new().state("illinois").genre("thriller"));
        assert_eq!(names(&found), vec!["The Other Side of the Door", "The Witch", "The Boy"]);
    }

    #[test]
    fn adding_a_criterion_never_grows_a_level() {
        let catalog = catalog();
        let evening = MomentRange { start_time: NaiveTime::from_hms_opt(18, 0, 0), ..MomentRange::unbounded() };
        let base = Criteria::new();
        let extras = [
            base.clone().movie_name("deadpool"),
            base.clone().genre("action"),
            base.clone().city("seattle"),
            base.clone().state("illinois"),
            base.clone().theater("rm16"),
            base.clone().range(evening),
        ];

        let base_found = find_movie_match(&catalog, &base);
        for narrowed in &extras {
            let found = find_movie_match(&catalog, narrowed);
            assert!(found.len() <= base_found.len(), "{narrowed:?}");
            for movie in &found {
                let wide = filter_showings(movie, None, None, None, &base.range);
                let tight = filter_showings(
                    movie,
                    narrowed.city.as_deref(),
                    narrowed.state.as_deref(),
                    narrowed.theater_name.as_deref(),
                    &narrowed.range,
                );
                assert!(tight.len() <= wide.len());
                for showing in &tight {
                    assert!(filter_times(showing, &narrowed.range).len() <= filter_times(showing, &base.range).len());
                }
            }
        }
    }

    #[test]
    fn criteria_read_from_memory() {
        let mut memory = SlotMemory::new();
        memory.set(memory::FILTER_GENRE, vec![MemoryValue::text("Comedy"), MemoryValue::text("Action")]);
        memory.set_string(memory::FILTER_CITY, "Seattle");
        memory.set_string(memory::FILTER_THEATER, "");

        let criteria = Criteria::from_memory(&memory, MomentRange::unbounded());
        assert_eq!(criteria, Criteria::new().genre("Action").city("Seattle"));
    }
}
