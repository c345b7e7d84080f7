//! # Key-value persistence surface
//!
//! [`KeyValueStore`] is the only I/O the session layer performs. It mirrors the
//! browser's `localStorage` contract: string keys, string values, synchronous
//! access. Every operation is fallible so storage quota errors or a disabled
//! storage area surface as a [`StorageError`] instead of a panic; the
//! [`SessionStore`](crate::SessionStore) decides what to do with them.
//!
//! Implementations live in sibling modules ([`crate::MemoryStore`],
//! [`crate::FileStore`] and, on the web, `LocalStorageStore`).

use thiserror::Error;

/// Failure of the underlying storage area.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage area does not exist or was disabled by the user agent.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Writing `key` would exceed the storage quota.
    #[error("storage quota exceeded while writing `{key}`")]
    QuotaExceeded { key: String },
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
