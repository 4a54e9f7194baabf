//! Export request handling.
//!
//! A request goes through the permission gate first, then the language
//! selector is validated, and only then are records fetched and serialized.

use tracing::{debug, info, warn};
use wger_common::ExerciseStatus;
use wger_store::ExerciseSource;
use wger_xml::{ImageStorage, XmlExporter};

use crate::{Capability, Error, ExportResponse, LanguageSelector, Permissions, Result};

/// Attachment name of a full export.
pub const FULL_EXPORT_FILENAME: &str = "wger_exercises.xml";

/// Attachment name of an export filtered to the display languages.
pub fn language_export_filename(language: &str) -> String {
    format!("wger_{language}_exercises.xml")
}

/// Exercise counts shown on the export overview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOverview {
    /// All exercises in the store.
    pub total: usize,
    /// Accepted exercises in the display languages.
    pub by_display_languages: usize,
}

/// Handles export requests against a record source and image storage.
pub struct ExportHandler<Src, S> {
    source: Src,
    exporter: XmlExporter<S>,
    display_languages: Vec<String>,
}

impl<Src: ExerciseSource, S: ImageStorage> ExportHandler<Src, S> {
    /// Create a handler. `display_languages` are short codes in order of
    /// preference.
    pub fn new(source: Src, storage: S, display_languages: Vec<String>) -> Self {
        Self {
            source,
            exporter: XmlExporter::new(storage),
            display_languages,
        }
    }

    pub fn display_languages(&self) -> &[String] {
        &self.display_languages
    }

    /// Handle an export request for `selector` (`all` or `user`).
    ///
    /// # Errors
    ///
    /// - [`Error::PermissionDenied`] if `permissions` lacks
    ///   [`Capability::ChangeExercise`]; nothing else is looked at.
    /// - [`Error::BadRequest`] for any other selector; nothing is fetched.
    /// - [`Error::NoDisplayLanguages`] for `user` without configured languages.
    /// - [`Error::Store`] / [`Error::Export`] if fetching or serializing fails.
    pub fn handle(&self, permissions: &Permissions, selector: &str) -> Result<ExportResponse> {
        permissions.require(Capability::ChangeExercise)?;
        debug!(selector, "export requested");

        let selector: LanguageSelector = selector.parse().map_err(|e| {
            warn!(selector, "rejected export request");
            e
        })?;

        let (records, filename) = match selector {
            LanguageSelector::All => (self.source.fetch_all()?, FULL_EXPORT_FILENAME.to_string()),
            LanguageSelector::User => {
                let first = self
                    .display_languages
                    .first()
                    .ok_or(Error::NoDisplayLanguages)?;
                let records = self
                    .source
                    .fetch_by_language_and_status(&self.display_languages, ExerciseStatus::Accepted)?;
                (records, language_export_filename(first))
            }
        };

        let body = self.exporter.export(&records)?;
        info!(
            selector = %selector,
            exercises = records.len(),
            bytes = body.len(),
            filename = %filename,
            "exported exercises"
        );

        Ok(ExportResponse { filename, body })
    }

    /// Exercise counts for the overview page.
    pub fn overview(&self, permissions: &Permissions) -> Result<ExportOverview> {
        permissions.require(Capability::ChangeExercise)?;

        Ok(ExportOverview {
            total: self.source.count_all()?,
            by_display_languages: self
                .source
                .count_by_language_and_status(&self.display_languages, ExerciseStatus::Accepted)?,
        })
    }
}
