use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::{Candidate, Gender, ValidCandidate};
use crate::error::{RegistryError, Result};
use crate::store::CandidateStore;
use crate::validation::ValidationErrors;

/// SQLite-backed candidate store
///
/// ```sql
/// CREATE TABLE candidates (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     name TEXT NOT NULL,
///     age INTEGER NOT NULL,
///     gender TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     phone_number TEXT NOT NULL
/// );
/// ```
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

const SELECT_COLUMNS: &str = "SELECT id, name, age, gender, email, phone_number FROM candidates";

impl SqliteStore {
    /// Open (or create) the database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS candidates (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                gender TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                phone_number TEXT NOT NULL
            )",
            [],
        )?;

        tracing::debug!("Opened candidate store at {}", db_path);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RegistryError::Other("candidate store lock poisoned".to_string()))
    }

    fn row_to_candidate(row: &Row<'_>) -> rusqlite::Result<Candidate> {
        let gender_code: String = row.get(3)?;
        let gender = Gender::from_code(&gender_code).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                format!("unknown gender code '{}'", gender_code).into(),
            )
        })?;

        Ok(Candidate {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            gender,
            email: row.get(4)?,
            phone_number: row.get(5)?,
        })
    }
}

/// Map a UNIQUE violation on `email` to the field error callers expect
fn map_write_error(err: rusqlite::Error) -> RegistryError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation => {
            RegistryError::Validation(ValidationErrors::single("email", "Email already exists"))
        }
        _ => RegistryError::Database(err),
    }
}

#[async_trait]
impl CandidateStore for SqliteStore {
    async fn insert(&self, candidate: &ValidCandidate) -> Result<Candidate> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO candidates (name, age, gender, email, phone_number)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                candidate.name,
                candidate.age,
                candidate.gender.code(),
                candidate.email,
                candidate.phone_number,
            ],
        )
        .map_err(map_write_error)?;

        Ok(Candidate {
            id: conn.last_insert_rowid(),
            name: candidate.name.clone(),
            age: candidate.age,
            gender: candidate.gender,
            email: candidate.email.clone(),
            phone_number: candidate.phone_number.clone(),
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Candidate>> {
        let conn = self.conn()?;

        let candidate = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_COLUMNS),
                params![id],
                Self::row_to_candidate,
            )
            .optional()?;

        Ok(candidate)
    }

    async fn list(&self) -> Result<Vec<Candidate>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;
        let candidates = stmt
            .query_map([], Self::row_to_candidate)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(candidates)
    }

    async fn update(&self, candidate: &Candidate) -> Result<bool> {
        let conn = self.conn()?;

        let changed = conn
            .execute(
                "UPDATE candidates
                 SET name = ?2, age = ?3, gender = ?4, email = ?5, phone_number = ?6
                 WHERE id = ?1",
                params![
                    candidate.id,
                    candidate.name,
                    candidate.age,
                    candidate.gender.code(),
                    candidate.email,
                    candidate.phone_number,
                ],
            )
            .map_err(map_write_error)?;

        Ok(changed > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM candidates WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        let conn = self.conn()?;

        let exists: bool = match exclude_id {
            Some(id) => conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM candidates WHERE email = ?1 AND id != ?2)",
                params![email, id],
                |row| row.get(0),
            )?,
            None => conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM candidates WHERE email = ?1)",
                params![email],
                |row| row.get(0),
            )?,
        };

        Ok(exists)
    }

    async fn count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM candidates", [], |row| row.get(0))?;
        Ok(count)
    }
}
