use crate::{
    error::{BoardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::{path::Path, sync::Mutex};

/// SQLite-backed key-value storage
pub struct SqliteStorage {
    connection: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `database_path`
    pub fn new(database_path: impl AsRef<Path>) -> Result<Self> {
        let connection = Connection::open(database_path).map_err(to_storage_error)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Opens a private in-memory database
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(to_storage_error)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| BoardError::StorageError("SQLite connection poisoned".to_string()))?;
        f(&connection).map_err(to_storage_error)
    }
}

fn to_storage_error(err: rusqlite::Error) -> BoardError {
    BoardError::StorageError(err.to_string())
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn initialize(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute(
                "CREATE TABLE IF NOT EXISTS entries (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
                [],
            )
            .map(|_| ())
        })
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            conn.query_row(
                "SELECT value FROM entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO entries (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
        })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM entries WHERE key = ?1", params![key])
                .map(|_| ())
        })
    }
}
