//! In-memory key-value store.

use std::collections::HashMap;

use lancenotas_core::error::Result;
use lancenotas_core::kv::{KeyValueStore, validate_key};
use parking_lot::Mutex;

/// A [`KeyValueStore`] that lives only as long as the value itself.
///
/// Share one instance through an `Arc` to simulate a process restart: drop the
/// services, keep the store, build new services on it.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;
        self.values.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.values.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        assert!(store.get("turmas").unwrap().is_none());

        store.set("turmas", b"[]").unwrap();
        assert_eq!(store.get("turmas").unwrap().unwrap(), b"[]");
        assert_eq!(store.len(), 1);

        store.remove("turmas").unwrap();
        store.remove("turmas").unwrap();
        assert!(store.is_empty());
    }
}
