//! # holocache
//!
//! Read-through cache layer for the Holocron catalog.
//!
//! ## Architecture
//! - **CacheKey**: disjoint `category`, `category:id` and `client:<id>:<category>` namespaces
//! - **CacheAside**: try the store, else compute, store the JSON and return it
//! - **CacheStats**: hit/miss/write/store-error counters shared by every clone of a cache
//! - **VisibilityTracker**: per-client, append-only set of visited entries

#![warn(missing_docs)]

mod cache;
mod key;
mod stats;
mod visibility;

pub use cache::CacheAside;
pub use key::CacheKey;
pub use stats::{CacheStats, StatsSnapshot};
pub use visibility::VisibilityTracker;
