use thiserror::Error;

/// Errors raised while building the catalog or persisting resolved ranges.
///
/// Noisy conversational input (malformed dates, unknown slot kinds, empty
/// filters) never produces an error: it degrades to "absent".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("movie '{movie}' references unknown theater code '{code}'")]
    UnknownTheater { movie: String, code: String },

    #[error("theater code '{0}' is defined more than once")]
    DuplicateTheater(String),

    #[error("movie seed at position {0} has an empty name")]
    EmptyMovieName(usize),

    #[error("showtime window starting {0} runs past the supported calendar")]
    DateOutOfRange(chrono::NaiveDate),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for showtime operations.
pub type Result<T> = std::result::Result<T, Error>;
