//! Record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist opaque UTF-8 records under string keys.
//! - Provide full-scan iteration in ascending key order.
//!
//! # Invariants
//! - `put` is one autocommit statement; no partial write is observable.
//! - `scan` reads from a single statement, so one call never observes a key
//!   twice.
//! - `delete` on an absent key succeeds.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECORDS_TABLE: &str = "records";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the record store adapter.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "record store connection not initialized: expected schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One stored record together with the key it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Storage key; may differ from any id inside `value`.
    pub key: String,
    /// Opaque serialized record.
    pub value: String,
}

/// Whole-record key-value store.
pub trait RecordStore {
    /// Creates or overwrites the record at `key`.
    fn put(&self, key: &str, record: &str) -> StoreResult<()>;
    /// Exact-key lookup.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Removes the record at `key`, if any.
    fn delete(&self, key: &str) -> StoreResult<()>;
    /// Snapshot of every record in ascending key order.
    fn scan(&self) -> StoreResult<Vec<StoredRecord>>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn put(&self, key: &str, record: &str) -> StoreResult<()> {
        (**self).put(key, record)
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }

    fn scan(&self) -> StoreResult<Vec<StoredRecord>> {
        (**self).scan()
    }
}

/// SQLite-backed record store over the `records` table.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    /// Creates a store from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when the `records` table is absent.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn put(&self, key: &str, record: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO records (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, record],
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM records WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.conn.execute("DELETE FROM records WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn scan(&self) -> StoreResult<Vec<StoredRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT key, value FROM records ORDER BY key ASC;")?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(StoredRecord {
                key: row.get(0)?,
                value: row.get(1)?,
            });
        }

        Ok(records)
    }
}

fn ensure_store_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [RECORDS_TABLE],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(StoreError::MissingRequiredTable(RECORDS_TABLE));
    }

    Ok(())
}
