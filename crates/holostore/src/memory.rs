//! In-memory store for single-process deployments and tests

use std::collections::HashMap;

use ahash::RandomState;
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;
use crate::store::KeyValueStore;

/// Process-local key-value store.
///
/// Entries are never evicted; the map grows with every distinct key written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>, RandomState>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every key
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read().contains_key(key))
    }

    /// Matching keys come back sorted so scans are deterministic.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set("movies:1", b"{\"title\":\"A New Hope\"}").await.unwrap();

        let value = store.get("movies:1").await.unwrap();
        assert_eq!(value.as_deref(), Some(&b"{\"title\":\"A New Hope\"}"[..]));
        assert_eq!(store.get("movies:2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_whole_value() {
        let store = MemoryStore::new();
        store.set("k", b"first value").await.unwrap();
        store.set("k", b"2").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some(&b"2"[..]));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_exists() {
        let store = MemoryStore::new();
        assert!(!store.exists("planets:1").await.unwrap());

        store.set("planets:1", b"{}").await.unwrap();
        assert!(store.exists("planets:1").await.unwrap());
    }

    #[tokio::test]
    async fn test_keys_by_prefix() {
        let store = MemoryStore::new();
        store.set("movies", b"[]").await.unwrap();
        store.set("movies:4", b"{}").await.unwrap();
        store.set("movies:1", b"{}").await.unwrap();
        store.set("client:abc:movies", b"[\"1\"]").await.unwrap();

        let keys = store.keys("movies:").await.unwrap();
        assert_eq!(keys, vec!["movies:1".to_string(), "movies:4".to_string()]);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryStore::new();
        store.set("a", b"1").await.unwrap();
        store.set("b", b"2").await.unwrap();
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
    }
}
