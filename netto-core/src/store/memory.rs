use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::factory::{StoreConfig, StoreFactory};
use super::repository::{KeyValueStore, StoreError};

/// Process-local store. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Backend(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

pub struct MemoryStoreFactory;

#[async_trait]
impl StoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, _config: &StoreConfig) -> Result<Box<dyn KeyValueStore>, StoreError> {
        Ok(Box::new(MemoryStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::StoreRegistry;

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let store = MemoryStore::new();

        assert_eq!(store.get("absent").await, Ok(None));
    }

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let store = MemoryStore::new();
        store.set("k", "v1").await.unwrap();

        assert_eq!(store.get("k").await, Ok(Some("v1".to_string())));
    }

    #[tokio::test]
    async fn set_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();

        assert_eq!(store.get("k").await, Ok(Some("v2".to_string())));
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_missing() {
        let store = MemoryStore::new();
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();

        assert_eq!(store.get("k").await, Ok(None));
    }

    #[tokio::test]
    async fn registry_creates_memory_store() {
        let mut reg = StoreRegistry::new();
        reg.register(Box::new(MemoryStoreFactory));

        let store = reg.create(&StoreConfig::default()).await.unwrap();
        store.set("k", "v").await.unwrap();

        assert_eq!(store.get("k").await, Ok(Some("v".to_string())));
    }
}
