use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{KeyValueStore, StoreError, StoreKey};

/// In-process store. Nothing survives the process; used by tests and by
/// embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<StoreKey, String>> {
        // A panic while holding the lock cannot leave a half-written String behind.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(&key).cloned())
    }

    fn put_raw(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.entries().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        self.entries().remove(&key);
        Ok(())
    }
}
