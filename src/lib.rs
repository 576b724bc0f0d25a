//! Showtime resolution.
//!
//! Turns partially specified, multi-turn search criteria into matching
//! movies, showings and showtimes:
//!
//! 1. [`resolver`] merges date/time fragments from the current turn with the
//!    previously resolved range.
//! 2. [`engine`] narrows a [`Catalog`] movie → showing → time.
//! 3. [`engine::classify`] decides what to expose: nothing, one answer, a short
//!    list, or an overflow flag.
//!
//! [`detect_entities`] and [`get_movies`] run those steps against a slot
//! [`Memory`] the way a conversation host would between turns.

#[macro_use]
mod macros;
mod api;
pub mod catalog;
pub mod engine;
mod error;
pub mod memory;
pub mod moment;
pub mod resolver;
mod synonyms;

pub use api::{Context, Options, SearchResult, detect_entities, find, find_with, get_movies, read_resolved_range};
pub use catalog::{Catalog, Location, Movie, MovieSeed, Showing, Theater, TheaterSeed};
pub use engine::{Classification, Criteria, Pick, find_movie_match};
pub use error::{Error, Result};
pub use memory::{Memory, MemoryValue, SlotMemory};
pub use moment::{MomentRange, RangeAxes, TimeRange};
pub use resolver::{DateTimeFragment, ResolvedRange, resolve};
pub use synonyms::GenreSynonyms;

#[cfg(test)]
mod scenarios;
