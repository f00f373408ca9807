//! # holocron
//!
//! Read-through caching aggregator in front of the Star Wars catalog API.
//!
//! Every upstream response is cached through [`holocache::CacheAside`];
//! cross-reference URLs (a film's planets, a character's films) are resolved
//! into display names, and each client's visited movies scope its character
//! listings.
//!
//! ## Layers
//! - **Upstream**: paginated REST source (`HttpUpstream` over reqwest)
//! - **Paginator**: drains every page of a collection into one list
//! - **resolver**: URL arrays to names, by-ID lookup or search in a collection
//! - **filter**: scopes listings to visited entries
//! - **Catalog**: the operations served to the HTTP layer

#![warn(missing_docs)]

mod catalog;
mod category;
mod error;
pub mod filter;
mod models;
mod pagination;
pub mod resolver;
mod sort;
mod upstream;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use catalog::Catalog;
pub use category::Category;
pub use error::{Error, Result};
pub use models::{Character, Entity, Movie, Planet, Starship};
pub use pagination::{Paginator, DEFAULT_PAGE_SIZE};
pub use sort::{sort_movies, SortKey, SortOrder};
pub use upstream::{HttpUpstream, Page, Upstream};
