//! Redis-backed store
//!
//! Every key is written under a namespace prefix so the catalog cache can
//! share a Redis instance with other tenants of the same server.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

use crate::error::Result;
use crate::store::KeyValueStore;

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "api:";

/// Store backed by a Redis server
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    namespace: String,
}

impl RedisStore {
    /// Connect to the Redis server at `url`
    ///
    /// # Arguments
    /// * `url` - Connection string, e.g. `redis://127.0.0.1:6379`
    /// * `namespace` - Prefix applied to every key
    pub async fn connect(url: &str, namespace: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        let namespace = namespace.into();
        info!("Connected to Redis at {} (namespace '{}')", url, namespace);
        Ok(Self { conn, namespace })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(self.namespaced(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.namespaced(key), value).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let found: bool = conn.exists(self.namespaced(key)).await?;
        Ok(found)
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}{}*", escape_glob(&self.namespace), escape_glob(prefix));
        let keys: Vec<String> = conn.keys(pattern).await?;
        Ok(strip_namespace(&self.namespace, keys))
    }
}

/// Escape Redis glob metacharacters so `s` matches literally in a KEYS pattern
fn escape_glob(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn strip_namespace(namespace: &str, keys: Vec<String>) -> Vec<String> {
    keys.into_iter()
        .filter_map(|key| key.strip_prefix(namespace).map(str::to_string))
        .collect()
}
