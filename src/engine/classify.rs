//! Result classification.
//!
//! ```text
//! matched movies ──┬─ 0            -> NoMatch
//!                  ├─ 1            -> Single (+ Pick when one showing, one time)
//!                  ├─ 2..threshold -> Candidates(names)
//!                  └─ ≥ threshold  -> Overflow
//! ```
//!
//! [`Classification::apply`] writes the result as `found-*` facts, always
//! clearing the previous cycle's facts first.

use chrono::NaiveDateTime;
use tracing::debug;

use super::Criteria;
use super::showings::{filter_showings, filter_times};
use crate::Options;
use crate::catalog::Movie;
use crate::memory::{self, Memory};

/// Short local time, e.g. `8:00 PM`.
pub const SHOWTIME_FORMAT: &str = "%-I:%M %p";

/// A single showtime the criteria narrowed down to.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub time: NaiveDateTime,
    pub theater: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    NoMatch,
    Single { name: String, rating: f32, pick: Option<Pick> },
    Candidates(Vec<String>),
    Overflow { count: usize },
}

impl Classification {
    pub fn found_movies(&self) -> Vec<&str> {
        match self {
            Classification::Single { name, .. } => vec![name.as_str()],
            Classification::Candidates(names) => names.iter().map(String::as_str).collect(),
            Classification::NoMatch | Classification::Overflow { .. } => Vec::new(),
        }
    }

    pub fn found_rating(&self) -> Option<f32> {
        match self {
            Classification::Single { rating, .. } => Some(*rating),
            _ => None,
        }
    }

    pub fn found_time(&self) -> Option<String> {
        self.pick().map(|p| format_showtime(&p.time))
    }

    pub fn found_theater(&self) -> Option<&str> {
        self.pick().map(|p| p.theater.as_str())
    }

    pub fn found_excess(&self) -> bool {
        matches!(self, Classification::Overflow { .. })
    }

    pub fn pick(&self) -> Option<&Pick> {
        match self {
            Classification::Single { pick, .. } => pick.as_ref(),
            _ => None,
        }
    }

    /// Replace the `found-*` facts in `memory` with this classification.
    pub fn apply(&self, memory: &mut impl Memory) {
        for key in memory::FOUND_FACTS {
            memory.delete(key);
        }

        match self {
            Classification::NoMatch => {}
            Classification::Single { name, rating, pick } => {
                memory.set_string(memory::FOUND_MOVIES, name.as_str());
                memory.set_number(memory::FOUND_RATING, *rating);
                if let Some(pick) = pick {
                    memory.set_string(memory::FOUND_TIME, format_showtime(&pick.time));
                    memory.set_string(memory::FOUND_THEATER, pick.theater.as_str());
                }
            }
            Classification::Candidates(names) => memory.set_string_list(memory::FOUND_MOVIES, names),
            Classification::Overflow { .. } => memory.set_bool(memory::FOUND_EXCESS, true),
        }
    }
}

pub fn format_showtime(time: &NaiveDateTime) -> String {
    time.format(SHOWTIME_FORMAT).to_string()
}

/// Classify the output of [`find_movie_match`](super::find_movie_match).
///
/// A single movie is re-filtered against the same criteria to look for a
/// unique showing, then a unique time within it.
pub fn classify(matched: &[&Movie], criteria: &Criteria, options: &Options) -> Classification {
    let classification = match matched {
        [] => Classification::NoMatch,
        [movie] => {
            let showings = filter_showings(
                movie,
                criteria.city.as_deref(),
                criteria.state.as_deref(),
                criteria.theater_name.as_deref(),
                &criteria.range,
            );
            let pick = match showings.as_slice() {
                [showing] => match filter_times(showing, &criteria.range).as_slice() {
                    [time] => Some(Pick { time: *time, theater: showing.theater.name.clone() }),
                    _ => None,
                },
                _ => None,
            };
            Classification::Single { name: movie.name.clone(), rating: movie.rating, pick }
        }
        many if many.len() < options.overflow_threshold => {
            Classification::Candidates(many.iter().map(|m| m.name.clone()).collect())
        }
        many => Classification::Overflow { count: many.len() },
    };

    debug!(matched = matched.len(), ?classification, "classified");
    classification
}
