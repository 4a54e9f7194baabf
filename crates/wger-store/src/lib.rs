//! Exercise storage for the wger exporter.
//!
//! [`ExerciseSource`] is the query interface the request handler reads
//! records through; [`SqliteStore`] implements it on top of SQLite.
//!
//! # Example
//!
//! ```no_run
//! use wger_common::ExerciseStatus;
//! use wger_store::{ExerciseSource, SqliteStore};
//!
//! let store = SqliteStore::open("wger.db")?;
//! let languages = vec!["en".to_string()];
//! for record in store.fetch_by_language_and_status(&languages, ExerciseStatus::Accepted)? {
//!     println!("{} ({})", record.name, record.category.name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod schema;
mod seed;
mod source;
mod store;

pub use error::{Error, Result};
pub use seed::NewExercise;
pub use source::ExerciseSource;
pub use store::SqliteStore;
