use crate::ports::{KeyValueStore, StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-local storage; `unavailable()` simulates disabled storage
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    unavailable: bool,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails with `StorageError::Unavailable`
    pub fn unavailable() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            unavailable: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn check(&self) -> StorageResult<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable(
                "in-memory store configured as unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.check()?;
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check()?;
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.check()?;
        self.entries.write().remove(key);
        Ok(())
    }
}
