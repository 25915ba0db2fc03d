//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQL details from service/business orchestration.
//!
//! # Invariants
//! - Repositories are constructed via `try_new`, which verifies that the
//!   connection has the expected schema version and required tables/columns.
//! - Repository APIs return semantic errors (`NotFound`, `Conflict`) in
//!   addition to transport errors.
//! - Timestamps are persisted as RFC 3339 UTC text with fixed nanosecond
//!   precision so `ORDER BY` on the text column is chronological.

use crate::db::{migrations, DbError};
use crate::model::ValidationError;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod comment_repo;
pub mod todo_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence and query error for todo/comment repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Domain validation rejected the data before any SQL ran.
    Validation(ValidationError),
    /// Transport-level database failure.
    Db(DbError),
    /// The referenced row does not exist.
    NotFound(Uuid),
    /// The store rejected an update (constraint violation, busy, locked).
    /// Callers treat this as "not applied", never as corruption.
    Conflict(String),
    /// Persisted state violates a domain invariant.
    InvalidData(String),
    /// Connection has no schema applied yet.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Schema version matches but a required table is absent.
    MissingRequiredTable(&'static str),
    /// Schema version matches but a required column is absent.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "row not found: {id}"),
            Self::Conflict(message) => write!(f, "persistence conflict: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection has schema version {actual_version}, expected {expected_version}; \
                 open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, _) = &value {
            if matches!(
                failure.code,
                ErrorCode::ConstraintViolation
                    | ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
            ) {
                return Self::Conflict(value.to_string());
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Formats a timestamp for storage. Fixed nanosecond precision keeps the
/// text column sortable.
pub(crate) fn datetime_to_db(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_db_datetime(value: &str, context: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| RepoError::InvalidData(format!("invalid timestamp `{value}` in {context}")))
}

pub(crate) fn parse_db_uuid(value: &str, context: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {context}")))
}

/// Verifies that `conn` was opened through the db module and carries the
/// full schema this repository layer was built against.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version == 0 {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    const REQUIRED: &[(&str, &[&str])] = &[
        (
            "todos",
            &["id", "creation_time", "update_time", "title", "body"],
        ),
        ("comments", &["id", "todo_id", "creation_time", "body"]),
    ];

    for &(table, columns) in REQUIRED {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
