//! Database schema.

use rusqlite::{Connection, Result as SqliteResult};

/// Create all tables and indexes if they do not exist yet.
///
/// Tables:
/// - `languages`, `licenses`, `categories`: one row per referenced entity
/// - `muscles`, `equipment`: lookup tables
/// - `exercises`: the exercises themselves
/// - `exercise_muscles`: muscle links, `is_primary` separates main from secondary
/// - `exercise_equipment`: equipment links
/// - `exercise_images`: stored image paths per exercise
pub(crate) fn init_schema(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS languages (
            id INTEGER PRIMARY KEY,
            short_name TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS licenses (
            id INTEGER PRIMARY KEY,
            short_name TEXT NOT NULL,
            full_name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS muscles (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS equipment (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS exercises (
            id INTEGER PRIMARY KEY,
            uuid TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            license_author TEXT,
            status TEXT NOT NULL DEFAULT '1',
            creation_date TEXT,
            category_id INTEGER NOT NULL REFERENCES categories(id),
            license_id INTEGER NOT NULL REFERENCES licenses(id),
            language_id INTEGER NOT NULL REFERENCES languages(id)
        );

        CREATE TABLE IF NOT EXISTS exercise_muscles (
            exercise_id INTEGER NOT NULL REFERENCES exercises(id),
            muscle_id INTEGER NOT NULL REFERENCES muscles(id),
            is_primary INTEGER NOT NULL,
            PRIMARY KEY (exercise_id, muscle_id, is_primary)
        );

        CREATE TABLE IF NOT EXISTS exercise_equipment (
            exercise_id INTEGER NOT NULL REFERENCES exercises(id),
            equipment_id INTEGER NOT NULL REFERENCES equipment(id),
            PRIMARY KEY (exercise_id, equipment_id)
        );

        CREATE TABLE IF NOT EXISTS exercise_images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            exercise_id INTEGER NOT NULL REFERENCES exercises(id),
            image TEXT NOT NULL,
            is_main INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_exercises_language ON exercises(language_id, status);
        CREATE INDEX IF NOT EXISTS idx_exercise_images_exercise ON exercise_images(exercise_id);
        ",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        for table in [
            "languages",
            "licenses",
            "categories",
            "muscles",
            "equipment",
            "exercises",
            "exercise_muscles",
            "exercise_equipment",
            "exercise_images",
        ] {
            assert!(tables.contains(&table.to_string()), "missing table {table}");
        }
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }
}
