//! Error types for the exercise store.

use thiserror::Error;

/// Errors that can occur when reading or writing the exercise store.
#[derive(Debug, Error)]
pub enum Error {
    /// SQLite error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] wger_common::Error),

    /// Stored creation date could not be parsed.
    #[error("invalid creation date {value:?} on exercise {exercise_id}")]
    InvalidDate { exercise_id: i64, value: String },

    /// Stored UUID could not be parsed.
    #[error("invalid UUID {value:?} on exercise {exercise_id}")]
    InvalidUuid {
        exercise_id: i64,
        value: String,
        #[source]
        source: uuid::Error,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;
