//! Durable key/value storage for client-local state
//!
//! The auditor keeps two pieces of state between runs: the saved snippet
//! collection and the service token. Both are opaque strings stored under
//! fixed keys, so the backend only needs `get`, `set` and `remove`.
//!
//! # Backends
//!
//! - [`SqliteStorage`]: a single `kv_store` table in the data directory.
//!   WAL mode is enabled so a running TUI and a one-off CLI command can share
//!   the file.
//! - [`MemoryStorage`]: process-local map for tests and `--ephemeral` runs.
//!
//! # Database Schema
//!
//! 1. **kv_store** - `key` (primary key), `value`, `updated_at`
//! 2. **schema_version** - applied schema versions
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use contract_auditor::storage::{SqliteStorage, Storage};
//! use std::path::PathBuf;
//!
//! # fn main() -> anyhow::Result<()> {
//! let storage = SqliteStorage::open(PathBuf::from("/tmp/contract-auditor/contract-auditor.db"))?;
//! storage.set("greeting", "hello")?;
//! assert_eq!(storage.get("greeting")?, Some("hello".to_string()));
//! # Ok(())
//! # }
//! ```

use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Key holding the serialized snippet collection
pub const SNIPPETS_KEY: &str = "saved_snippets";

/// Key holding the bearer token for the analysis service
pub const TOKEN_KEY: &str = "auth_token";

const SCHEMA_VERSION: i32 = 1;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Could not prepare storage directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// String-valued key/value storage
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// SQLite-backed storage
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Open (or create) the database at `path` and make sure the schema exists
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(&path)?;

        // Enable WAL mode for better concurrent access
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let storage = Self {
            conn: Mutex::new(conn),
            path: Some(path),
        };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let storage = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
            path: None,
        };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Location of the database file (`None` for in-memory databases)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }

    fn initialize_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;

        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }

    /// Highest applied schema version
    pub fn schema_version(&self) -> Result<i32, StorageError> {
        let conn = self.conn()?;
        let version = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )?;
        Ok(version)
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Process-local storage
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.values.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values()?.remove(key);
        Ok(())
    }
}
