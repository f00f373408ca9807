//! Catalog collections

use std::fmt;

/// A collection of the upstream catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Films
    Movies,
    /// People
    Characters,
    /// Planets
    Planets,
    /// Starships
    Starships,
}

impl Category {
    /// Every category
    pub const ALL: [Category; 4] = [
        Category::Movies,
        Category::Characters,
        Category::Planets,
        Category::Starships,
    ];

    /// Namespace of this category's cache keys
    pub fn cache_name(self) -> &'static str {
        match self {
            Category::Movies => "movies",
            Category::Characters => "characters",
            Category::Planets => "planets",
            Category::Starships => "starships",
        }
    }

    /// Path segment of this category on the upstream API
    pub fn upstream_path(self) -> &'static str {
        match self {
            Category::Movies => "films",
            Category::Characters => "people",
            Category::Planets => "planets",
            Category::Starships => "starships",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cache_name())
    }
}
