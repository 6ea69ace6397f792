//! Synchronous key-value slots the assessment store persists into.

mod memory;
mod schema;
mod sqlite;
#[cfg(feature = "web")]
mod browser;

pub use memory::*;
pub use schema::*;
pub use sqlite::*;
#[cfg(feature = "web")]
pub use browser::*;

use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A synchronous string key-value store, one value per key.
pub trait KeyValueSlot {
    /// Read the value under `key`, `None` if nothing is stored.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueSlot + ?Sized> KeyValueSlot for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
