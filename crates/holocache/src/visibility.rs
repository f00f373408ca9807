//! Per-client visibility tracking
//!
//! Records which entries of one category each client has fetched, so later
//! listings can be scoped to what that client has already seen. The set for
//! a client lives under `client:<id>:<category>` as a JSON string array.
//!
//! Updates are read-modify-write without isolation: two concurrent visits by
//! the same client may lose one of the entries.

use std::sync::Arc;

use holostore::KeyValueStore;
use tracing::{debug, warn};

use crate::key::CacheKey;

/// Append-only visited-entry sets, one per client
#[derive(Clone)]
pub struct VisibilityTracker {
    store: Arc<dyn KeyValueStore>,
    category: String,
}

impl VisibilityTracker {
    /// Track visits to entries of `category`
    pub fn new(store: Arc<dyn KeyValueStore>, category: impl Into<String>) -> Self {
        Self {
            store,
            category: category.into(),
        }
    }

    /// Add `entry_id` to the client's set unless it is already there
    pub async fn record_visit(&self, client_id: &str, entry_id: &str) {
        let key = CacheKey::client(client_id, &self.category);
        let mut visited = self.visited(client_id).await;
        if visited.iter().any(|id| id == entry_id) {
            return;
        }
        visited.push(entry_id.to_string());

        let bytes = match serde_json::to_vec(&visited) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("skipping visibility write for {}: {}", key, e);
                return;
            }
        };
        match self.store.set(key.as_str(), &bytes).await {
            Ok(()) => debug!("client {} visited {}:{}", client_id, self.category, entry_id),
            Err(e) => warn!("visibility write failed for {}: {}", key, e),
        }
    }

    /// Entries the client has visited, in first-visit order
    pub async fn visited(&self, client_id: &str) -> Vec<String> {
        let key = CacheKey::client(client_id, &self.category);
        let bytes = match self.store.get(key.as_str()).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("visibility read failed for {}: {}", key, e);
                return Vec::new();
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!("discarding undecodable visibility set {}: {}", key, e);
            Vec::new()
        })
    }

    /// Entries any client has caused to be cached.
    ///
    /// Derived from the `<category>:<id>` keys present in the store, so it
    /// reflects cache misses across all clients rather than one client's
    /// own visits.
    pub async fn visited_across_clients(&self) -> Vec<String> {
        let prefix = CacheKey::entry_prefix(&self.category);
        match self.store.keys(&prefix).await {
            Ok(keys) => keys
                .iter()
                .filter_map(|key| key.rsplit(':').next())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                warn!("key scan failed for {}*: {}", prefix, e);
                Vec::new()
            }
        }
    }
}
