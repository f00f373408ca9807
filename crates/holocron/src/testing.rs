//! In-memory upstream for tests
//!
//! Serves fixed collections with the upstream's pagination shape, records
//! every request, and can inject failures or random latency.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;
use serde_json::Value;

use crate::category::Category;
use crate::error::{Error, Result};
use crate::resolver::reference_id;
use crate::upstream::{Page, Upstream};

/// Base URL used for entity URLs in fixtures
pub const FIXTURE_BASE: &str = "https://swapi.dev/api";

/// URL of entry `id` of `category` under [`FIXTURE_BASE`]
pub fn entity_url(category: Category, id: impl std::fmt::Display) -> String {
    format!("{}/{}/{}/", FIXTURE_BASE, category.upstream_path(), id)
}

/// Build `count` entries with ids `1..=count`, setting each entry's `url`
pub fn numbered<F>(category: Category, count: usize, build: F) -> Vec<Value>
where
    F: Fn(usize) -> Value,
{
    (1..=count)
        .map(|i| {
            let mut entry = build(i);
            entry["url"] = Value::String(entity_url(category, i));
            entry
        })
        .collect()
}

/// Upstream double backed by in-memory collections
///
/// Requests are recorded as `<path>?page=<n>` and `<path>/<id>`.
#[derive(Default)]
pub struct StaticUpstream {
    collections: HashMap<Category, Vec<Value>>,
    page_size: usize,
    failing: HashSet<String>,
    max_latency_ms: u64,
    calls: Mutex<Vec<String>>,
}

impl StaticUpstream {
    /// Empty upstream with pages of 10
    pub fn new() -> Self {
        Self {
            page_size: 10,
            ..Self::default()
        }
    }

    /// Serve pages of `page_size` entries
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Serve `entries` as the whole of `category`
    pub fn with_collection(mut self, category: Category, entries: Vec<Value>) -> Self {
        self.collections.insert(category, entries);
        self
    }

    /// Append one entry to `category`
    pub fn with_entry(mut self, category: Category, entry: Value) -> Self {
        self.collections.entry(category).or_default().push(entry);
        self
    }

    /// Answer requests for `call` (as recorded) with status 500
    pub fn failing(mut self, call: &str) -> Self {
        self.failing.insert(call.to_string());
        self
    }

    /// Delay every response by a random 0..=`max_ms` milliseconds
    pub fn with_latency(mut self, max_ms: u64) -> Self {
        self.max_latency_ms = max_ms;
        self
    }

    /// Every request made so far, in arrival order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of requests whose recorded form starts with `prefix`
    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.starts_with(prefix)).count()
    }

    async fn enter(&self, call: String) -> Result<()> {
        self.calls.lock().push(call.clone());

        if self.max_latency_ms > 0 {
            let delay = rand::thread_rng().gen_range(0..=self.max_latency_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.failing.contains(&call) {
            return Err(Error::Upstream {
                url: format!("{}/{}", FIXTURE_BASE, call),
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Upstream for StaticUpstream {
    async fn fetch_page(&self, category: Category, page: u32) -> Result<Page> {
        let call = format!("{}?page={}", category.upstream_path(), page);
        self.enter(call.clone()).await?;

        let entries = self.collections.get(&category).cloned().unwrap_or_default();
        let start = (page.max(1) as usize - 1) * self.page_size;
        let end = (start + self.page_size).min(entries.len());
        let results = entries.get(start..end).map(<[Value]>::to_vec).unwrap_or_default();
        let next = (end < entries.len()).then(|| {
            format!(
                "{}/{}?page={}",
                FIXTURE_BASE,
                category.upstream_path(),
                page + 1
            )
        });

        Ok(Page {
            count: entries.len() as u64,
            results,
            next,
        })
    }

    async fn fetch_entry(&self, category: Category, id: &str) -> Result<Value> {
        let call = format!("{}/{}", category.upstream_path(), id);
        self.enter(call.clone()).await?;

        self.collections
            .get(&category)
            .and_then(|entries| {
                entries.iter().find(|entry| {
                    entry["url"]
                        .as_str()
                        .map(|url| reference_id(url) == id)
                        .unwrap_or(false)
                })
            })
            .cloned()
            .ok_or_else(|| Error::Upstream {
                url: format!("{}/{}", FIXTURE_BASE, call),
                status: 404,
            })
    }
}
