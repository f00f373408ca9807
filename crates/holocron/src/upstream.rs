//! Upstream catalog API client

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::category::Category;
use crate::error::{Error, Result};

/// One page of a collection listing
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Total number of entries across all pages
    pub count: u64,
    /// Entries on this page, in upstream order
    pub results: Vec<Value>,
    /// URL of the following page, if any
    #[serde(default)]
    pub next: Option<String>,
}

/// Source of catalog data
///
/// Entries are handed back as raw JSON; callers decode them into the entity
/// type they expect.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetch page `page` (1-based) of a collection
    async fn fetch_page(&self, category: Category, page: u32) -> Result<Page>;

    /// Fetch one entry by id
    async fn fetch_entry(&self, category: Category, id: &str) -> Result<Value>;
}

/// Upstream reached over plain HTTP GET
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUpstream {
    /// Create a client for the API rooted at `base_url`, e.g. `https://swapi.dev/api`
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn page_url(&self, category: Category, page: u32) -> String {
        if page <= 1 {
            format!("{}/{}", self.base_url, category.upstream_path())
        } else {
            format!("{}/{}?page={}", self.base_url, category.upstream_path(), page)
        }
    }

    fn entry_url(&self, category: Category, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, category.upstream_path(), id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream {
                url,
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch_page(&self, category: Category, page: u32) -> Result<Page> {
        self.get_json(self.page_url(category, page)).await
    }

    async fn fetch_entry(&self, category: Category, id: &str) -> Result<Value> {
        self.get_json(self.entry_url(category, id)).await
    }
}
