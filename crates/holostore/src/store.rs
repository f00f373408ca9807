//! The store contract shared by every backend

use async_trait::async_trait;

use crate::error::Result;

/// String-keyed byte store.
///
/// Writes replace the whole value under a key. Implementations must be safe
/// to share across tasks; no transactional isolation is assumed between
/// separate calls.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Check whether `key` holds a value
    async fn exists(&self, key: &str) -> Result<bool>;

    /// List every key starting with `prefix`
    async fn keys(&self, prefix: &str) -> Result<Vec<String>>;
}
