//! Whole-document persistence.
//!
//! Every entity the engine owns (history, streak, badges, milestones,
//! key statistics, leaderboard) is a single JSON document stored under a
//! fixed namespaced key. Mutations rewrite the entire document; there are
//! no partial or patch updates. The store is a trait so components can be
//! tested against an in-memory double instead of a global singleton.

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::StorageError;

use super::data_dir;

/// Keys of the persisted documents.
///
/// Exhaustive by construction: adding a document means adding a variant,
/// and every match over `DocKey` is checked by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKey {
    History,
    Streak,
    Badges,
    Milestones,
    KeyStats,
    Leaderboard,
}

impl DocKey {
    /// The namespaced storage key for this document.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKey::History => "keyflow.history",
            DocKey::Streak => "keyflow.streak",
            DocKey::Badges => "keyflow.badges",
            DocKey::Milestones => "keyflow.milestones",
            DocKey::KeyStats => "keyflow.keystats",
            DocKey::Leaderboard => "keyflow.leaderboard",
        }
    }

    /// All document keys, in no particular order.
    pub fn all() -> [DocKey; 6] {
        [
            DocKey::History,
            DocKey::Streak,
            DocKey::Badges,
            DocKey::Milestones,
            DocKey::KeyStats,
            DocKey::Leaderboard,
        ]
    }
}

/// Backing store for whole-document reads and writes.
///
/// A single logical writer is assumed; concurrent writers from separate
/// processes follow last-write-wins and are unsupported.
pub trait DocumentStore {
    /// Read the raw document under `key`, `None` if absent.
    fn read(&self, key: DocKey) -> Result<Option<String>, StorageError>;

    /// Replace the document under `key`.
    fn write(&mut self, key: DocKey, value: &str) -> Result<(), StorageError>;

    /// Remove the document under `key` if present.
    fn remove(&mut self, key: DocKey) -> Result<(), StorageError>;

    /// Remove every document (full wipe).
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Decode a stored document, falling back to the type's default.
///
/// A document that fails to parse is treated as absent: the entity
/// reinitializes rather than aborting the read path. The malformed payload
/// is left in place until the next write replaces it.
pub fn load_or_default<T>(store: &dyn DocumentStore, key: DocKey) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    match store.read(key)? {
        None => Ok(T::default()),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                eprintln!("Warning: malformed document {}: {e}", key.as_str());
                Ok(T::default())
            }
        },
    }
}

/// Encode and write a document.
pub fn save<T>(store: &mut dyn DocumentStore, key: DocKey, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
{
    let raw = serde_json::to_string(value)
        .map_err(|e| StorageError::QueryFailed(format!("serialize {}: {e}", key.as_str())))?;
    store.write(key, &raw)
}

/// SQLite-backed document store.
///
/// One `documents` table, one row per [`DocKey`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at `~/.config/keyflow/keyflow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(data_dir()?.join("keyflow.db"))
    }

    /// Open the store at an explicit database path.
    pub fn open_at(path: std::path::PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl DocumentStore for SqliteStore {
    fn read(&self, key: DocKey) -> Result<Option<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM documents WHERE key = ?1")?;
        let result = stmt.query_row(params![key.as_str()], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: DocKey, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO documents (key, value) VALUES (?1, ?2)",
            params![key.as_str(), value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: DocKey) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM documents WHERE key = ?1", params![key.as_str()])?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM documents", [])?;
        Ok(())
    }
}

/// In-memory document store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: HashMap<DocKey, String>,
    /// When set, every write fails (for unavailable-store tests).
    fail_all: bool,
    /// When set, writes to this one document fail (for cascade tests).
    fail_key: Option<DocKey>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent writes fail, simulating an unavailable store.
    pub fn fail_writes(&mut self) {
        self.fail_all = true;
    }

    /// Make writes to `key` alone fail, simulating a mid-cascade failure.
    pub fn fail_writes_for(&mut self, key: DocKey) {
        self.fail_key = Some(key);
    }

    /// Restore normal write behavior.
    pub fn allow_writes(&mut self) {
        self.fail_all = false;
        self.fail_key = None;
    }

    /// Seed a raw document, bypassing the write-failure switches.
    pub fn seed(&mut self, key: DocKey, value: &str) {
        self.docs.insert(key, value.to_string());
    }

    fn check_writable(&self, key: DocKey) -> Result<(), StorageError> {
        if self.fail_all || self.fail_key == Some(key) {
            return Err(StorageError::QuotaExceeded);
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, key: DocKey) -> Result<Option<String>, StorageError> {
        Ok(self.docs.get(&key).cloned())
    }

    fn write(&mut self, key: DocKey, value: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.docs.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: DocKey) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.docs.remove(&key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        if self.fail_all {
            return Err(StorageError::QuotaExceeded);
        }
        self.docs.clear();
        Ok(())
    }
}
