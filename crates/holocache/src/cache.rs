//! CacheAside: read-through JSON cache over a holostore backend

use std::future::Future;
use std::sync::Arc;

use holostore::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::key::CacheKey;
use crate::stats::CacheStats;

/// Read-through cache storing every value as JSON under its key.
///
/// Clones share the same store and statistics. Values never expire. Two
/// concurrent misses on one key both compute and both write; the last write
/// wins.
#[derive(Clone)]
pub struct CacheAside {
    /// Shared backend
    store: Arc<dyn KeyValueStore>,

    /// Hit/miss/write counters
    stats: Arc<CacheStats>,
}

impl CacheAside {
    /// Create a cache over `store`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Return the value cached under `key`, or compute, store and return it.
    ///
    /// `compute` runs at most once per call and only on a miss. A miss is an
    /// absent key, a value that no longer decodes as `T`, or a vacant JSON
    /// value (`null`, `false`, `0`, `""`, `[]`). The computed value is stored
    /// even when it is itself vacant, so vacant results are recomputed on
    /// every call.
    ///
    /// When `compute` fails nothing is stored and its error is returned as is.
    /// An unreachable store behaves as an always-missing cache: read failures
    /// fall through to `compute` and write failures are dropped.
    ///
    /// # Arguments
    /// * `key` - Key to read and populate
    /// * `compute` - Produces the value on a miss; may call `try_get` itself
    pub async fn try_get<T, E, F, Fut>(&self, key: &CacheKey, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.read::<T>(key).await {
            self.stats.record_hit();
            debug!("cache hit: {}", key);
            return Ok(value);
        }

        self.stats.record_miss();
        debug!("cache miss: {}", key);

        let value = compute().await?;
        self.write(key, &value).await;
        Ok(value)
    }

    async fn read<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let bytes = match self.store.get(key.as_str()).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                self.stats.record_store_error();
                warn!("cache read failed for {}: {}", key, e);
                return None;
            }
        };

        let json: Value = match serde_json::from_slice(&bytes) {
            Ok(json) => json,
            Err(e) => {
                warn!("discarding undecodable cache entry {}: {}", key, e);
                return None;
            }
        };

        if is_vacant(&json) {
            return None;
        }

        match serde_json::from_value(json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("discarding cache entry {} with unexpected shape: {}", key, e);
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &CacheKey, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("skipping cache write for {}: {}", key, e);
                return;
            }
        };

        match self.store.set(key.as_str(), &bytes).await {
            Ok(()) => self.stats.record_write(),
            Err(e) => {
                self.stats.record_store_error();
                warn!("cache write failed for {}: {}", key, e);
            }
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

/// JSON values treated as "nothing cached"
fn is_vacant(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}
