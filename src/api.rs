use chrono::{Local, NaiveDate};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::catalog::{self, Catalog};
use crate::engine::{self, Classification, Criteria};
use crate::error::Result;
use crate::memory::{self, Memory};
use crate::moment::{MomentRange, TimeRange};
use crate::resolver::{self, ResolvedRange};
use crate::synonyms::GenreSynonyms;

/// Resolution context.
///
/// Holds the environment the catalog's showtime window is anchored to.
#[derive(Debug, Clone)]
pub struct Context {
    /// First day of the showtime window.
    pub today: NaiveDate,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            Self { today: NaiveDate::from_ymd_opt(2013, 2, 12).unwrap_or_default() }
        } else {
            Self { today: Local::now().date_naive() }
        }
    }
}

/// Options that affect filtering and classification.
#[derive(Debug, Clone)]
pub struct Options {
    /// Match count at which movie names stop being listed.
    pub overflow_threshold: usize,
    /// Rewrites applied to `filter-genre` values.
    pub genre_synonyms: GenreSynonyms,
}

impl Default for Options {
    fn default() -> Self {
        Self { overflow_threshold: 10, genre_synonyms: GenreSynonyms::default() }
    }
}

/// Result from [`find`] and [`find_with`].
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub criteria: Criteria,
    /// Names of every matched movie, in catalog order.
    pub movies: Vec<String>,
    pub classification: Classification,
    pub elapsed: Duration,
}

/// Search the shared catalog with default [`Options`].
///
/// Fails only if the shared catalog cannot be built.
///
/// # Example
/// ```
/// use showtime::{Classification, Criteria, find};
///
/// let out = find(&Criteria::new().genre("scifi")).unwrap();
/// assert!(matches!(out.classification, Classification::Single { .. }));
/// ```
pub fn find(criteria: &Criteria) -> Result<SearchResult> {
    Ok(find_with(catalog::shared()?, criteria, &Options::default()))
}

/// Search `catalog` with the provided `options`.
pub fn find_with(catalog: &Catalog, criteria: &Criteria, options: &Options) -> SearchResult {
    let started = Instant::now();
    let matched = engine::find_movie_match(catalog, criteria);
    let classification = engine::classify(&matched, criteria, options);

    SearchResult {
        criteria: criteria.clone(),
        movies: matched.iter().map(|m| m.name.clone()).collect(),
        classification,
        elapsed: started.elapsed(),
    }
}

/// Turn-start hook: normalize genres and fold this turn's temporal slots into
/// `resolved-times`.
///
/// The three temporal slots are consumed (deleted). `resolved-times` is
/// rewritten, or deleted when nothing constrains the range any more.
pub fn detect_entities(memory: &mut impl Memory, options: &Options) -> Result<ResolvedRange> {
    let genres = memory.get_string_list(memory::FILTER_GENRE);
    if !genres.is_empty() {
        let genres: Vec<String> = genres.iter().map(|g| options.genre_synonyms.canonical(g).to_string()).collect();
        memory.delete(memory::FILTER_GENRE);
        memory.set_string_list(memory::FILTER_GENRE, &genres);
    }

    let datetime = take_fragment(memory, memory::FILTER_DATETIME);
    let date = take_fragment(memory, memory::FILTER_DATE);
    let time = take_fragment(memory, memory::FILTER_TIME);
    let previous = read_resolved_range(&*memory);

    let resolved = resolver::resolve(&datetime, &date, &time, &previous);
    match resolved.to_time_range() {
        None => memory.delete(memory::RESOLVED_TIMES),
        Some(range) => memory.set_string(memory::RESOLVED_TIMES, serde_json::to_string(&range)?),
    }

    debug!(?resolved, "entity detection complete");
    Ok(resolved)
}

/// Decode the `resolved-times` slot. Missing or malformed means unbounded.
pub fn read_resolved_range(memory: &impl Memory) -> MomentRange {
    let Some(text) = memory.get_string(memory::RESOLVED_TIMES) else {
        return MomentRange::unbounded();
    };
    match serde_json::from_str::<TimeRange>(&text) {
        Ok(range) => range.to_moment_range(),
        Err(err) => {
            warn!(%err, "ignoring malformed resolved-times");
            MomentRange::unbounded()
        }
    }
}

/// Callback: search with the criteria in `memory` and publish `found-*` facts.
pub fn get_movies(memory: &mut impl Memory, catalog: &Catalog, options: &Options) -> Classification {
    let criteria = Criteria::from_memory(&*memory, read_resolved_range(&*memory));
    let result = find_with(catalog, &criteria, options);
    result.classification.apply(memory);

    info!(matched = result.movies.len(), elapsed = ?result.elapsed, "movies searched");
    result.classification
}

fn take_fragment(memory: &mut impl Memory, key: &str) -> resolver::DateTimeFragment {
    let fragment = resolver::decode(memory.get(key));
    memory.delete(key);
    fragment
}
