//! Exercise records as handed to the exporter.
//!
//! All types here are plain owned data. A record always carries exactly one
//! category, license and language; the muscle, equipment and image
//! collections may be empty.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::ExerciseStatus;

/// Format used for `creation_date` in exports.
pub const CREATION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Exercise category (e.g. "Chest").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// License an exercise is published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub id: i64,
    pub short_name: String,
    pub full_name: String,
}

/// Language an exercise is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub id: i64,
    /// Short code such as `en` or `de`.
    pub short_name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Muscle {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
}

/// An image attached to an exercise.
///
/// `path` is the storage location of the binary payload; only its last
/// component is shown in exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseImage {
    pub path: String,
    pub is_main: bool,
}

/// One exercise with all of its relations resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub id: i64,
    pub name: String,
    pub license_author: Option<String>,
    pub status: ExerciseStatus,
    pub creation_date: Option<NaiveDateTime>,
    pub category: Category,
    pub license: License,
    pub language: Language,
    pub uuid: Uuid,
    pub description: String,
    pub muscles: Vec<Muscle>,
    pub muscles_secondary: Vec<Muscle>,
    pub equipment: Vec<Equipment>,
    pub images: Vec<ExerciseImage>,
}

impl ExerciseRecord {
    /// Author attribution, or an empty string when unknown.
    #[inline]
    pub fn author(&self) -> &str {
        self.license_author.as_deref().unwrap_or("")
    }

    /// Creation date formatted as `YYYY-MM-DDTHH:MM:SS`, or empty when absent.
    pub fn creation_date_string(&self) -> String {
        self.creation_date
            .map(|date| date.format(CREATION_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// UUID as 32 lowercase hex digits without hyphens.
    pub fn uuid_hex(&self) -> String {
        self.uuid.simple().to_string()
    }

    /// Whether the record has at least one image.
    #[inline]
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}
