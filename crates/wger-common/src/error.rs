//! Error types for wger-common.

use thiserror::Error;

/// Common error type for the exercise domain model.
#[derive(Debug, Error)]
pub enum Error {
    /// Status code is not one of the known moderation states.
    #[error("invalid exercise status code: {0:?} (expected \"1\", \"2\" or \"3\")")]
    InvalidStatus(String),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
