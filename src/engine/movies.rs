use super::normalize::{normalize_name, present};
use crate::catalog::Movie;

/// Movies matching `movie_name` and `genre`, in catalog order.
///
/// A movie matches a genre when any of its tags equals it, ignoring case.
pub fn filter_movies<'a>(movies: &'a [Movie], movie_name: Option<&str>, genre: Option<&str>) -> Vec<&'a Movie> {
    let name_test = present(movie_name).map(normalize_name);
    let genre_test = present(genre).map(str::to_lowercase);

    movies
        .iter()
        .filter(|m| name_test.as_ref().is_none_or(|name| normalize_name(&m.name) == *name))
        .filter(|m| genre_test.as_ref().is_none_or(|genre| m.genres.iter().any(|g| g.to_lowercase() == *genre)))
        .collect()
}
