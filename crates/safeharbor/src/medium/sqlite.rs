//! `SQLite`-backed record medium.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::schema::{
    DELETE_RECORD, SCHEMA_STATEMENTS, SELECT_RECORD, SELECT_UPDATED_AT, UPSERT_RECORD,
};
use super::Medium;
use crate::error::{Error, Result};

const IN_MEMORY_PATH: &str = ":memory:";

/// Durable medium storing each record as one row of a `SQLite` table.
///
/// Calls run on the blocking thread pool so the async caller is suspended
/// rather than blocked while the database does its I/O.
#[derive(Debug, Clone)]
pub struct SqliteMedium {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteMedium {
    /// Open or create a database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema cannot
    /// be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=FULL;")?;
        initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a database and set how long a locked database is retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_with_timeout(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
        let medium = Self::open(path)?;
        medium.lock()?.busy_timeout(busy_timeout)?;
        Ok(medium)
    }

    /// Create an in-memory database. Nothing survives the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(IN_MEMORY_PATH),
            source,
        })?;
        initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(IN_MEMORY_PATH),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the record under `key` was last replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let stamp: Option<String> = self
            .with_conn(key, |conn, key| {
                Ok(conn
                    .query_row(SELECT_UPDATED_AT, [key], |row| row.get(0))
                    .optional()?)
            })
            .await?;

        Ok(stamp
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    /// Size of the database file in bytes. Zero for in-memory databases.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        if self.path.to_string_lossy() == IN_MEMORY_PATH {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::medium("database connection lock poisoned"))
    }

    /// Run `op` against the connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, key: &str, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection, &str) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| Error::medium("database connection lock poisoned"))?;
            op(&*conn, &key)
        })
        .await?
    }
}

#[async_trait::async_trait]
impl Medium for SqliteMedium {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(key, |conn, key| {
            Ok(conn
                .query_row(SELECT_RECORD, [key], |row| row.get(0))
                .optional()?)
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let value = value.to_string();
        let len = value.len();
        self.with_conn(key, move |conn, key| {
            let now = Utc::now().to_rfc3339();
            conn.execute(UPSERT_RECORD, params![key, value, now])?;
            Ok(())
        })
        .await?;
        debug!("Replaced record {} ({} bytes)", key, len);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .with_conn(key, |conn, key| Ok(conn.execute(DELETE_RECORD, [key])?))
            .await?;
        Ok(affected > 0)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

/// Create the records table if it doesn't exist.
fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("safeharbor_{name}_{}.db", std::process::id()))
    }

    fn cleanup(path: &Path) {
        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(path.with_extension("db-wal"));
        let _ = std::fs::remove_file(path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_in_memory() {
        let medium = SqliteMedium::open_in_memory().unwrap();
        assert_eq!(medium.path().to_string_lossy(), ":memory:");
        assert_eq!(medium.size_bytes(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let medium = SqliteMedium::open_in_memory().unwrap();
        assert_eq!(medium.get("@safety_plan").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let medium = SqliteMedium::open_in_memory().unwrap();
        medium.set("k", r#"{"a":1}"#).await.unwrap();
        assert_eq!(
            medium.get("k").await.unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[tokio::test]
    async fn test_set_replaces_whole_value() {
        let medium = SqliteMedium::open_in_memory().unwrap();
        medium.set("k", "first").await.unwrap();
        medium.set("k", "second").await.unwrap();
        assert_eq!(medium.get("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_remove() {
        let medium = SqliteMedium::open_in_memory().unwrap();
        medium.set("k", "v").await.unwrap();
        assert!(medium.remove("k").await.unwrap());
        assert!(!medium.remove("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_updated_at() {
        let medium = SqliteMedium::open_in_memory().unwrap();
        assert!(medium.updated_at("k").await.unwrap().is_none());

        let before = Utc::now();
        medium.set("k", "v").await.unwrap();
        let stamp = medium.updated_at("k").await.unwrap().unwrap();
        assert!(stamp >= before - chrono::Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_unicode_value() {
        let medium = SqliteMedium::open_in_memory().unwrap();
        medium.set("k", "Biblioteca 🏠 مرحبا").await.unwrap();
        assert_eq!(
            medium.get("k").await.unwrap().as_deref(),
            Some("Biblioteca 🏠 مرحبا")
        );
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let path = temp_db_path("reopen");
        cleanup(&path);

        {
            let medium = SqliteMedium::open(&path).unwrap();
            medium.set("k", "persisted").await.unwrap();
        }

        let medium = SqliteMedium::open(&path).unwrap();
        assert_eq!(medium.get("k").await.unwrap().as_deref(), Some("persisted"));
        assert!(medium.size_bytes() > 0);

        drop(medium);
        cleanup(&path);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!("safeharbor_nested_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        let path = root.join("nested/records.db");

        let medium = SqliteMedium::open(&path).unwrap();
        assert!(path.exists());
        assert!(medium.describe().starts_with("sqlite:"));

        drop(medium);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_open_with_timeout() {
        let path = temp_db_path("timeout");
        cleanup(&path);

        let medium = SqliteMedium::open_with_timeout(&path, Duration::from_millis(250));
        assert!(medium.is_ok());

        drop(medium);
        cleanup(&path);
    }
}
