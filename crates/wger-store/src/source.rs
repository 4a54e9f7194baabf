//! Query interface the exporter is fed from.

use wger_common::{ExerciseRecord, ExerciseStatus};

use crate::Result;

/// Read-only access to exercise records.
///
/// Languages are passed in by short code (`en`, `de`, ...). Implementations
/// decide nothing about which languages are active; that is configuration
/// owned by the caller.
pub trait ExerciseSource {
    /// Every exercise, regardless of language or status.
    fn fetch_all(&self) -> Result<Vec<ExerciseRecord>>;

    /// Exercises in one of `languages` with the given `status`, ordered by
    /// category id.
    fn fetch_by_language_and_status(
        &self,
        languages: &[String],
        status: ExerciseStatus,
    ) -> Result<Vec<ExerciseRecord>>;

    /// Number of exercises, regardless of language or status.
    fn count_all(&self) -> Result<usize>;

    /// Number of exercises [`fetch_by_language_and_status`] would return.
    ///
    /// [`fetch_by_language_and_status`]: Self::fetch_by_language_and_status
    fn count_by_language_and_status(
        &self,
        languages: &[String],
        status: ExerciseStatus,
    ) -> Result<usize>;
}

impl<T: ExerciseSource + ?Sized> ExerciseSource for &T {
    fn fetch_all(&self) -> Result<Vec<ExerciseRecord>> {
        (**self).fetch_all()
    }

    fn fetch_by_language_and_status(
        &self,
        languages: &[String],
        status: ExerciseStatus,
    ) -> Result<Vec<ExerciseRecord>> {
        (**self).fetch_by_language_and_status(languages, status)
    }

    fn count_all(&self) -> Result<usize> {
        (**self).count_all()
    }

    fn count_by_language_and_status(
        &self,
        languages: &[String],
        status: ExerciseStatus,
    ) -> Result<usize> {
        (**self).count_by_language_and_status(languages, status)
    }
}
