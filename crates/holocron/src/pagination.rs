//! Draining paginated collections

use std::sync::Arc;

use futures_util::future::try_join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::category::Category;
use crate::error::Result;
use crate::upstream::Upstream;

/// Page size of the upstream API
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Assembles every page of a collection into one list.
///
/// Page 1 gives the total count; pages `2..=ceil(count / page_size)` are then
/// requested together. Entries come back in page order, then in-page order.
/// A single failed page fails the whole fetch.
#[derive(Clone)]
pub struct Paginator {
    upstream: Arc<dyn Upstream>,
    page_size: u64,
}

impl Paginator {
    /// Create a paginator with the upstream's fixed page size
    pub fn new(upstream: Arc<dyn Upstream>, page_size: u64) -> Self {
        Self {
            upstream,
            page_size: page_size.max(1),
        }
    }

    /// Fetch every entry of `category` as raw JSON
    pub async fn fetch_all(&self, category: Category) -> Result<Vec<Value>> {
        let first = self.upstream.fetch_page(category, 1).await?;
        let total_pages = first.count.div_ceil(self.page_size).max(1) as u32;
        debug!(
            "draining {}: {} entries over {} pages",
            category, first.count, total_pages
        );

        let rest = try_join_all(
            (2..=total_pages).map(|page| self.upstream.fetch_page(category, page)),
        )
        .await?;

        let mut entries = first.results;
        for page in rest {
            entries.extend(page.results);
        }
        Ok(entries)
    }

    /// Fetch every entry of `category`, decoded as `T`
    pub async fn fetch_all_as<T: DeserializeOwned>(&self, category: Category) -> Result<Vec<T>> {
        self.fetch_all(category)
            .await?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(Into::into))
            .collect()
    }
}
