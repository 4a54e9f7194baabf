//! Write access used to populate a store.

use chrono::NaiveDateTime;
use rusqlite::params;
use uuid::Uuid;
use wger_common::{ExerciseImage, ExerciseStatus, CREATION_DATE_FORMAT};

use crate::{Result, SqliteStore};

/// An exercise to insert, with relations given by id.
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub license_author: Option<String>,
    pub status: ExerciseStatus,
    pub creation_date: Option<NaiveDateTime>,
    pub category_id: i64,
    pub license_id: i64,
    pub language_id: i64,
    pub muscles: Vec<i64>,
    pub muscles_secondary: Vec<i64>,
    pub equipment: Vec<i64>,
    pub images: Vec<ExerciseImage>,
}

impl NewExercise {
    /// A pending exercise with a random UUID and no muscles, equipment or
    /// images.
    pub fn new<N: Into<String>>(
        name: N,
        category_id: i64,
        license_id: i64,
        language_id: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            license_author: None,
            status: ExerciseStatus::Pending,
            creation_date: None,
            category_id,
            license_id,
            language_id,
            muscles: Vec::new(),
            muscles_secondary: Vec::new(),
            equipment: Vec::new(),
            images: Vec::new(),
        }
    }
}

impl SqliteStore {
    /// Insert a language, returning its id.
    pub fn insert_language(&self, short_name: &str, full_name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO languages (short_name, full_name) VALUES (?1, ?2)",
            [short_name, full_name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a license, returning its id.
    pub fn insert_license(&self, short_name: &str, full_name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO licenses (short_name, full_name) VALUES (?1, ?2)",
            [short_name, full_name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a category, returning its id.
    pub fn insert_category(&self, name: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO categories (name) VALUES (?1)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a muscle, returning its id.
    pub fn insert_muscle(&self, name: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO muscles (name) VALUES (?1)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert an equipment item, returning its id.
    pub fn insert_equipment(&self, name: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO equipment (name) VALUES (?1)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert an exercise and all of its links in one transaction, returning
    /// the new exercise id.
    pub fn insert_exercise(&mut self, exercise: &NewExercise) -> Result<i64> {
        let tx = self.conn.transaction()?;

        let creation_date = exercise
            .creation_date
            .map(|date| date.format(CREATION_DATE_FORMAT).to_string());
        tx.execute(
            "INSERT INTO exercises
                (uuid, name, description, license_author, status, creation_date,
                 category_id, license_id, language_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                exercise.uuid.to_string(),
                exercise.name,
                exercise.description,
                exercise.license_author,
                exercise.status.code(),
                creation_date,
                exercise.category_id,
                exercise.license_id,
                exercise.language_id,
            ],
        )?;
        let id = tx.last_insert_rowid();

        let links = [(&exercise.muscles, true), (&exercise.muscles_secondary, false)];
        for (muscles, primary) in links {
            for muscle_id in muscles {
                tx.execute(
                    "INSERT INTO exercise_muscles (exercise_id, muscle_id, is_primary)
                     VALUES (?1, ?2, ?3)",
                    params![id, muscle_id, primary],
                )?;
            }
        }

        for equipment_id in &exercise.equipment {
            tx.execute(
                "INSERT INTO exercise_equipment (exercise_id, equipment_id) VALUES (?1, ?2)",
                params![id, equipment_id],
            )?;
        }

        for image in &exercise.images {
            tx.execute(
                "INSERT INTO exercise_images (exercise_id, image, is_main) VALUES (?1, ?2, ?3)",
                params![id, image.path, image.is_main],
            )?;
        }

        tx.commit()?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExerciseSource;

    #[test]
    fn test_insert_exercise_rejects_unknown_category() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let en = store.insert_language("en", "English").unwrap();
        let license = store.insert_license("CC-BY", "Creative Commons Attribution").unwrap();

        let exercise = NewExercise::new("Orphan", 42, license, en);
        assert!(store.insert_exercise(&exercise).is_err());
        assert_eq!(store.count_all().unwrap(), 0);
    }

    #[test]
    fn test_insert_exercise_rolls_back_on_bad_link() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let en = store.insert_language("en", "English").unwrap();
        let license = store.insert_license("CC-BY", "Creative Commons Attribution").unwrap();
        let category = store.insert_category("Arms").unwrap();

        let mut exercise = NewExercise::new("Curl", category, license, en);
        exercise.equipment = vec![999];
        assert!(store.insert_exercise(&exercise).is_err());
        assert_eq!(store.count_all().unwrap(), 0);
    }

    #[test]
    fn test_new_exercise_defaults() {
        let exercise = NewExercise::new("Curl", 1, 2, 3);
        assert_eq!(exercise.status, ExerciseStatus::Pending);
        assert!(exercise.muscles.is_empty());
        assert!(!exercise.uuid.is_nil());
    }
}
