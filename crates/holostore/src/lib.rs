//! # holostore
//!
//! Key-value stores backing the Holocron catalog cache.
//!
//! ## Architecture
//! - **KeyValueStore**: GET / SET / EXISTS / KEYS-by-prefix over string keys
//! - **MemoryStore**: process-local map, never evicts
//! - **RedisStore**: shared Redis instance, keys live under a namespace prefix

#![warn(missing_docs)]

mod error;
mod memory;
mod redis_store;
mod store;

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use redis_store::{RedisStore, DEFAULT_NAMESPACE};
pub use store::KeyValueStore;
