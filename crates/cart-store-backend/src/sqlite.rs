//! SQLite implementation of the Backend trait.
//!
//! This is the persistent backend. It uses rusqlite with bundled SQLite and
//! a single `kv` table.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{BackendError, Result};
use crate::migration::{self, now_millis};
use crate::traits::Backend;

/// SQLite-based backend implementation.
///
/// Thread-safe via internal Mutex. Calls block on the connection; the cart
/// store is synchronous, so nothing here is async.
#[derive(Debug)]
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// List stored keys in order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| BackendError::Poisoned(format!("mutex poisoned: {}", e)))
    }
}

impl Backend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now_millis()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_backend_basic() {
        let backend = SqliteBackend::open_memory().unwrap();
        assert_eq!(backend.get("cart").unwrap(), None);

        backend.set("cart", "{}").unwrap();
        backend.set("cart", r#"{"a":{}}"#).unwrap();
        assert_eq!(backend.get("cart").unwrap().as_deref(), Some(r#"{"a":{}}"#));

        backend.set("__test__", "__test__").unwrap();
        assert_eq!(backend.keys().unwrap(), vec!["__test__", "cart"]);

        backend.remove("__test__").unwrap();
        backend.remove("__test__").unwrap();
        assert_eq!(backend.keys().unwrap(), vec!["cart"]);
    }

    #[test]
    fn test_sqlite_backend_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.db");

        {
            let backend = SqliteBackend::open(&path).unwrap();
            backend.set("cart", "persisted").unwrap();
        }

        let backend = SqliteBackend::open(&path).unwrap();
        assert_eq!(backend.get("cart").unwrap().as_deref(), Some("persisted"));
    }
}
