//! SQLite storage for exercises.
//!
//! Exercises are read with a single join for their category, license and
//! language, then their muscles, equipment and images are loaded per row.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, params_from_iter, Connection, Params, Row};
use tracing::debug;
use uuid::Uuid;
use wger_common::{
    Category, Equipment, ExerciseImage, ExerciseRecord, ExerciseStatus, Language, License, Muscle,
};

use crate::schema::init_schema;
use crate::{Error, ExerciseSource, Result};

const EXERCISE_SELECT: &str = "
    SELECT e.id, e.uuid, e.name, e.description, e.license_author, e.status, e.creation_date,
           c.id, c.name,
           li.id, li.short_name, li.full_name,
           la.id, la.short_name, la.full_name
    FROM exercises e
    JOIN categories c ON c.id = e.category_id
    JOIN licenses li ON li.id = e.license_id
    JOIN languages la ON la.id = e.language_id";

/// Accepted layouts for stored creation dates, tried in order.
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// SQLite-backed exercise store.
///
/// # Example
///
/// ```ignore
/// let store = SqliteStore::open("wger.db")?;
/// let accepted = store.fetch_by_language_and_status(&["en".into()], ExerciseStatus::Accepted)?;
/// ```
pub struct SqliteStore {
    pub(crate) conn: Connection,
}

impl SqliteStore {
    /// Opens or creates a SQLite database at the given path.
    ///
    /// The schema is created on first open.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn query_exercises<P: Params>(&self, sql: &str, params: P) -> Result<Vec<ExerciseRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, ExerciseRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let records = rows
            .into_iter()
            .map(|row| self.resolve(row))
            .collect::<Result<Vec<_>>>()?;

        debug!(count = records.len(), "loaded exercises");
        Ok(records)
    }

    fn resolve(&self, row: ExerciseRow) -> Result<ExerciseRecord> {
        let uuid = Uuid::parse_str(&row.uuid).map_err(|source| Error::InvalidUuid {
            exercise_id: row.id,
            value: row.uuid.clone(),
            source,
        })?;
        let status: ExerciseStatus = row.status.parse()?;
        let creation_date = match row.creation_date.as_deref() {
            None | Some("") => None,
            Some(value) => Some(parse_creation_date(value).ok_or_else(|| Error::InvalidDate {
                exercise_id: row.id,
                value: value.to_string(),
            })?),
        };

        Ok(ExerciseRecord {
            id: row.id,
            muscles: self.muscles(row.id, true)?,
            muscles_secondary: self.muscles(row.id, false)?,
            equipment: self.equipment(row.id)?,
            images: self.images(row.id)?,
            name: row.name,
            license_author: row.license_author.filter(|author| !author.is_empty()),
            status,
            creation_date,
            category: row.category,
            license: row.license,
            language: row.language,
            uuid,
            description: row.description,
        })
    }

    fn muscles(&self, exercise_id: i64, primary: bool) -> Result<Vec<Muscle>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT m.id, m.name FROM exercise_muscles em
             JOIN muscles m ON m.id = em.muscle_id
             WHERE em.exercise_id = ?1 AND em.is_primary = ?2
             ORDER BY m.name, m.id",
        )?;
        let muscles = stmt
            .query_map(params![exercise_id, primary], |row| {
                Ok(Muscle {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(muscles)
    }

    fn equipment(&self, exercise_id: i64) -> Result<Vec<Equipment>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT eq.id, eq.name FROM exercise_equipment ee
             JOIN equipment eq ON eq.id = ee.equipment_id
             WHERE ee.exercise_id = ?1
             ORDER BY eq.name, eq.id",
        )?;
        let equipment = stmt
            .query_map([exercise_id], |row| {
                Ok(Equipment {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(equipment)
    }

    /// Main image first, then in insertion order.
    fn images(&self, exercise_id: i64) -> Result<Vec<ExerciseImage>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT image, is_main FROM exercise_images
             WHERE exercise_id = ?1
             ORDER BY is_main DESC, id",
        )?;
        let images = stmt
            .query_map([exercise_id], |row| {
                Ok(ExerciseImage {
                    path: row.get(0)?,
                    is_main: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(images)
    }
}

impl ExerciseSource for SqliteStore {
    fn fetch_all(&self) -> Result<Vec<ExerciseRecord>> {
        self.query_exercises(&format!("{EXERCISE_SELECT} ORDER BY e.id"), [])
    }

    fn fetch_by_language_and_status(
        &self,
        languages: &[String],
        status: ExerciseStatus,
    ) -> Result<Vec<ExerciseRecord>> {
        if languages.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "{EXERCISE_SELECT} WHERE e.status = ? AND la.short_name IN ({}) ORDER BY c.id, e.id",
            placeholders(languages.len())
        );
        self.query_exercises(&sql, params_from_iter(filter_params(languages, status)))
    }

    fn count_all(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn count_by_language_and_status(
        &self,
        languages: &[String],
        status: ExerciseStatus,
    ) -> Result<usize> {
        if languages.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "SELECT COUNT(*) FROM exercises e
             JOIN languages la ON la.id = e.language_id
             WHERE e.status = ? AND la.short_name IN ({})",
            placeholders(languages.len())
        );
        let count: i64 = self.conn.query_row(
            &sql,
            params_from_iter(filter_params(languages, status)),
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

/// Raw exercise row before relations are loaded.
struct ExerciseRow {
    id: i64,
    uuid: String,
    name: String,
    description: String,
    license_author: Option<String>,
    status: String,
    creation_date: Option<String>,
    category: Category,
    license: License,
    language: Language,
}

impl ExerciseRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            uuid: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            license_author: row.get(4)?,
            status: row.get(5)?,
            creation_date: row.get(6)?,
            category: Category {
                id: row.get(7)?,
                name: row.get(8)?,
            },
            license: License {
                id: row.get(9)?,
                short_name: row.get(10)?,
                full_name: row.get(11)?,
            },
            language: Language {
                id: row.get(12)?,
                short_name: row.get(13)?,
                full_name: row.get(14)?,
            },
        })
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Positional parameters for the status + language filter: status first.
fn filter_params(languages: &[String], status: ExerciseStatus) -> impl Iterator<Item = &str> {
    std::iter::once(status.code()).chain(languages.iter().map(String::as_str))
}

/// Parse a stored creation date. Bare dates are taken as midnight.
pub(crate) fn parse_creation_date(value: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewExercise;

    struct Fixture {
        store: SqliteStore,
        en: i64,
        de: i64,
        license: i64,
        chest: i64,
        legs: i64,
    }

    fn fixture() -> Fixture {
        let store = SqliteStore::open_in_memory().unwrap();
        let en = store.insert_language("en", "English").unwrap();
        let de = store.insert_language("de", "Deutsch").unwrap();
        let license = store
            .insert_license("CC-BY-SA 4", "Creative Commons Attribution Share Alike 4")
            .unwrap();
        let legs = store.insert_category("Legs").unwrap();
        let chest = store.insert_category("Chest").unwrap();
        Fixture { store, en, de, license, chest, legs }
    }

    fn names(records: &[ExerciseRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_fetch_all_resolves_relations() {
        let mut f = fixture();
        let triceps = f.store.insert_muscle("Triceps brachii").unwrap();
        let pecs = f.store.insert_muscle("Pectoralis major").unwrap();
        let delts = f.store.insert_muscle("Anterior deltoid").unwrap();
        let mat = f.store.insert_equipment("Gym mat").unwrap();

        let mut exercise = NewExercise::new("Push-up", f.chest, f.license, f.en);
        exercise.description = "Basic exercise".to_string();
        exercise.license_author = Some("wger team".to_string());
        exercise.status = ExerciseStatus::Accepted;
        exercise.creation_date = parse_creation_date("2014-02-01");
        exercise.muscles = vec![triceps, pecs];
        exercise.muscles_secondary = vec![delts];
        exercise.equipment = vec![mat];
        exercise.images = vec![
            ExerciseImage { path: "exercise-images/1/b.png".to_string(), is_main: false },
            ExerciseImage { path: "exercise-images/1/a.png".to_string(), is_main: true },
        ];
        let uuid = exercise.uuid;
        f.store.insert_exercise(&exercise).unwrap();

        let records = f.store.fetch_all().unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "Push-up");
        assert_eq!(record.uuid, uuid);
        assert_eq!(record.category.name, "Chest");
        assert_eq!(record.license.short_name, "CC-BY-SA 4");
        assert_eq!(record.language.short_name, "en");
        assert_eq!(record.author(), "wger team");
        assert_eq!(record.creation_date_string(), "2014-02-01T00:00:00");

        let primary: Vec<_> = record.muscles.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(primary, ["Pectoralis major", "Triceps brachii"]);
        assert_eq!(record.muscles_secondary[0].name, "Anterior deltoid");
        assert_eq!(record.equipment[0].name, "Gym mat");

        let images: Vec<_> = record.images.iter().map(|i| (i.path.as_str(), i.is_main)).collect();
        assert_eq!(
            images,
            [("exercise-images/1/a.png", true), ("exercise-images/1/b.png", false)]
        );
    }

    #[test]
    fn test_fetch_all_includes_every_language_and_status() {
        let mut f = fixture();
        let mut pending = NewExercise::new("Squat", f.legs, f.license, f.de);
        pending.status = ExerciseStatus::Pending;
        f.store.insert_exercise(&pending).unwrap();

        let mut accepted = NewExercise::new("Bench press", f.chest, f.license, f.en);
        accepted.status = ExerciseStatus::Accepted;
        f.store.insert_exercise(&accepted).unwrap();

        let records = f.store.fetch_all().unwrap();
        assert_eq!(names(&records), ["Squat", "Bench press"]);
        assert_eq!(f.store.count_all().unwrap(), 2);
    }

    #[test]
    fn test_filter_by_language_and_status() {
        let mut f = fixture();
        for (name, category, language, status) in [
            ("Lunge", f.chest, f.en, ExerciseStatus::Accepted),
            ("Kniebeuge", f.legs, f.de, ExerciseStatus::Accepted),
            ("Draft", f.legs, f.en, ExerciseStatus::Pending),
            ("Rejected", f.legs, f.en, ExerciseStatus::Declined),
            ("Squat", f.legs, f.en, ExerciseStatus::Accepted),
        ] {
            let mut exercise = NewExercise::new(name, category, f.license, language);
            exercise.status = status;
            f.store.insert_exercise(&exercise).unwrap();
        }

        let english = vec!["en".to_string()];
        let records = f
            .store
            .fetch_by_language_and_status(&english, ExerciseStatus::Accepted)
            .unwrap();
        // Legs was inserted before Chest, so it has the lower category id.
        assert_eq!(names(&records), ["Squat", "Lunge"]);
        assert_eq!(
            f.store
                .count_by_language_and_status(&english, ExerciseStatus::Accepted)
                .unwrap(),
            2
        );

        let both = vec!["en".to_string(), "de".to_string()];
        let records = f
            .store
            .fetch_by_language_and_status(&both, ExerciseStatus::Accepted)
            .unwrap();
        assert_eq!(names(&records), ["Kniebeuge", "Squat", "Lunge"]);
    }

    #[test]
    fn test_filter_with_no_languages() {
        let mut f = fixture();
        let mut exercise = NewExercise::new("Squat", f.legs, f.license, f.en);
        exercise.status = ExerciseStatus::Accepted;
        f.store.insert_exercise(&exercise).unwrap();

        assert!(f
            .store
            .fetch_by_language_and_status(&[], ExerciseStatus::Accepted)
            .unwrap()
            .is_empty());
        assert_eq!(
            f.store
                .count_by_language_and_status(&[], ExerciseStatus::Accepted)
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_empty_author_reads_as_none() {
        let mut f = fixture();
        let mut exercise = NewExercise::new("Squat", f.legs, f.license, f.en);
        exercise.license_author = Some(String::new());
        f.store.insert_exercise(&exercise).unwrap();

        let records = f.store.fetch_all().unwrap();
        assert_eq!(records[0].license_author, None);
        assert_eq!(records[0].creation_date, None);
    }

    #[test]
    fn test_invalid_status_is_an_error() {
        let mut f = fixture();
        let exercise = NewExercise::new("Squat", f.legs, f.license, f.en);
        let id = f.store.insert_exercise(&exercise).unwrap();
        f.store
            .conn
            .execute("UPDATE exercises SET status = 'x' WHERE id = ?1", [id])
            .unwrap();

        assert!(matches!(f.store.fetch_all(), Err(Error::Common(_))));
    }

    #[test]
    fn test_invalid_date_is_an_error() {
        let mut f = fixture();
        let exercise = NewExercise::new("Squat", f.legs, f.license, f.en);
        let id = f.store.insert_exercise(&exercise).unwrap();
        f.store
            .conn
            .execute("UPDATE exercises SET creation_date = 'yesterday' WHERE id = ?1", [id])
            .unwrap();

        match f.store.fetch_all() {
            Err(Error::InvalidDate { exercise_id, value }) => {
                assert_eq!(exercise_id, id);
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected invalid date, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_creation_date() {
        assert_eq!(
            parse_creation_date("2020-05-06T07:08:09").map(|d| d.to_string()),
            Some("2020-05-06 07:08:09".to_string())
        );
        assert_eq!(
            parse_creation_date("2020-05-06 07:08:09.123456").map(|d| d.to_string()),
            Some("2020-05-06 07:08:09.123456".to_string())
        );
        assert_eq!(
            parse_creation_date("2020-05-06").map(|d| d.to_string()),
            Some("2020-05-06 00:00:00".to_string())
        );
        assert_eq!(parse_creation_date("06.05.2020"), None);
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wger.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert_language("en", "English").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count_all().unwrap(), 0);
        assert!(store.insert_language("en", "English").is_err());
    }
}
