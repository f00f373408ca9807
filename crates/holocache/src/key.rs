//! Cache key construction

use std::fmt;

/// Reserved leading segment for per-client keys. No catalog category may use it.
const CLIENT_SEGMENT: &str = "client";

/// A key in the shared store
///
/// Shapes:
/// - `movies` - a whole collection
/// - `movies:4` - one entry of a collection
/// - `client:abc123:movies` - entries of a collection one client has fetched
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a whole collection
    pub fn collection(category: &str) -> Self {
        debug_assert_ne!(category, CLIENT_SEGMENT);
        Self(category.to_string())
    }

    /// Key for one entry of a collection
    pub fn entry(category: &str, id: &str) -> Self {
        debug_assert_ne!(category, CLIENT_SEGMENT);
        Self(format!("{}:{}", category, id))
    }

    /// Key for the entries of `category` a client has fetched
    pub fn client(client_id: &str, category: &str) -> Self {
        Self(format!("{}:{}:{}", CLIENT_SEGMENT, client_id, category))
    }

    /// Prefix shared by every entry key of `category`
    pub fn entry_prefix(category: &str) -> String {
        format!("{}:", category)
    }

    /// Raw key string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
