//! Key-Value Store Port
//!
//! Абстракция над local persistent storage (browser localStorage в web-клиенте,
//! JSON файл в CLI). Доступ синхронный, без cross-process locking.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage cannot be used at all (disabled, quota, private mode)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Stored data exists but cannot be parsed
    #[error("stored value for '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value storage scoped to one client origin
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove(&self, key: &str) -> StorageResult<()>;
}
