//! Common types for the wger export crates.
//!
//! This crate holds the exercise domain model shared by the store, the XML
//! exporter and the request handler:
//!
//! - [`ExerciseRecord`] - An exercise with its category, license, language,
//!   muscles, equipment and images
//! - [`ExerciseStatus`] - Moderation state and its stored code

mod error;
mod record;
mod status;

pub use error::{Error, Result};
pub use record::{
    Category, Equipment, ExerciseImage, ExerciseRecord, Language, License, Muscle,
    CREATION_DATE_FORMAT,
};
pub use status::ExerciseStatus;

/// Re-export uuid so downstream crates agree on the version.
pub use uuid::Uuid;
