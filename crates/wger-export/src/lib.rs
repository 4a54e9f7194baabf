//! wger exercise export.
//!
//! This crate ties the wger export crates together behind a request handler:
//!
//! - [`wger_common`] - Exercise domain model
//! - [`wger_store`] - SQLite record store and the [`ExerciseSource`] query interface
//! - [`wger_xml`] - XML serialization and image storage
//!
//! A request names a language selector: `all` exports every exercise, `user`
//! exports accepted exercises in the configured display languages. Callers
//! need the `exercises.change_exercise` capability.
//!
//! # Example
//!
//! ```no_run
//! use wger_export::prelude::*;
//!
//! let config = ExportConfig::load()?;
//! let store = SqliteStore::open(&config.database)?;
//! let handler = ExportHandler::new(
//!     store,
//!     FsImageStorage::new(&config.media_root),
//!     config.display_languages.clone(),
//! );
//!
//! let response = handler.handle(&config.permissions()?, "user")?;
//! response.write_to(&config.output_dir)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod handler;
mod permission;
mod response;
mod selector;

// Re-export the sub-crates
pub use wger_common as common;
pub use wger_store as store;
pub use wger_xml as xml;

pub use config::{ConfigError, ExportConfig};
pub use error::{Error, Result};
pub use handler::{language_export_filename, ExportHandler, ExportOverview, FULL_EXPORT_FILENAME};
pub use permission::{Capability, Permissions};
pub use response::ExportResponse;
pub use selector::LanguageSelector;

// Re-export commonly used types at the crate root
pub use wger_store::{ExerciseSource, SqliteStore};
pub use wger_xml::{FsImageStorage, XmlExporter};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Capability, ExportConfig, ExportHandler, ExportOverview, ExportResponse,
        LanguageSelector, Permissions,
    };
    pub use wger_common::{ExerciseRecord, ExerciseStatus};
    pub use wger_store::{ExerciseSource, NewExercise, SqliteStore};
    pub use wger_xml::{FsImageStorage, ImageStorage, MemoryImageStorage, XmlExporter};
}
