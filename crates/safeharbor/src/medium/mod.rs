//! Durable key-value media for safeharbor records.
//!
//! A [`Medium`] stores opaque string values under string keys. Each `set`
//! replaces the whole value or leaves the previous one untouched.

pub mod schema;
mod sqlite;

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};

pub use sqlite::SqliteMedium;

/// Device-local persistent key-value storage.
#[async_trait::async_trait]
pub trait Medium: Send + Sync {
    /// Read the value stored under `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the write. The previous value
    /// is then still in place.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`.
    ///
    /// Returns `true` if a value was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the delete.
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Short description of where data lives, for status output.
    fn describe(&self) -> String;
}

/// Volatile medium backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryMedium {
    /// Create an empty in-memory medium.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::medium("in-memory medium lock poisoned"))
    }
}

#[async_trait::async_trait]
impl Medium for MemoryMedium {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries()?.remove(key).is_some())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
