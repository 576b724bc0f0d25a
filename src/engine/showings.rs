use chrono::{Datelike, NaiveDateTime, Timelike};

use super::normalize::{normalize_name, present};
use crate::catalog::{Movie, Showing, Theater};
use crate::moment::MomentRange;

/// Showings of `movie` at matching theaters with at least one matching time.
pub fn filter_showings<'a>(
    movie: &'a Movie,
    city: Option<&str>,
    state: Option<&str>,
    theater_name: Option<&str>,
    range: &MomentRange,
) -> Vec<&'a Showing> {
    let city_test = present(city).map(str::to_lowercase);
    let state_test = present(state).map(str::to_lowercase);
    let theater_test = present(theater_name).map(normalize_name);

    movie
        .showings
        .iter()
        .filter(|s| city_test.as_ref().is_none_or(|city| s.theater.location.city.to_lowercase() == *city))
        .filter(|s| state_test.as_ref().is_none_or(|state| s.theater.location.state.to_lowercase() == *state))
        .filter(|s| theater_test.as_ref().is_none_or(|name| theater_matches(&s.theater, name)))
        .filter(|s| !filter_times(s, range).is_empty())
        .collect()
}

fn theater_matches(theater: &Theater, normalized: &str) -> bool {
    normalize_name(&theater.name) == normalized || normalize_name(&theater.code) == normalized
}

/// Showtimes of `showing` inside `range`.
///
/// - `start_date`: same weekday (not the same calendar date).
/// - `start_time`: hour of day at or after the start hour.
/// - `end_time`: hour of day at or before the end hour.
/// - `end_date`: not used.
pub fn filter_times(showing: &Showing, range: &MomentRange) -> Vec<NaiveDateTime> {
    showing
        .times
        .iter()
        .copied()
        .filter(|t| range.start_date.is_none_or(|d| t.weekday() == d.weekday()))
        .filter(|t| range.start_time.is_none_or(|s| t.hour() >= s.hour()))
        .filter(|t| range.end_time.is_none_or(|e| t.hour() <= e.hour()))
        .collect()
}
