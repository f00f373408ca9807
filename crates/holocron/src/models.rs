//! Catalog entities as served by the upstream API
//!
//! Reference fields hold absolute URLs as fetched; the detail operations
//! overwrite them with display names. Attributes not modelled here are kept
//! in `extra` so cached JSON round-trips without loss. Field names follow
//! the upstream JSON.

#![allow(missing_docs)]

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::Category;

/// An entity that other entities can reference by URL
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the entity belongs to
    const CATEGORY: Category;

    /// Canonical URL of this entity
    fn url(&self) -> &str;

    /// Human-readable value a reference to this entity resolves to
    fn display_name(&self) -> &str;
}

/// A film
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub title: String,
    pub episode_id: i64,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub characters: Vec<String>,
    pub planets: Vec<String>,
    pub starships: Vec<String>,
    pub vehicles: Vec<String>,
    pub species: Vec<String>,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub homeworld: String,
    pub films: Vec<String>,
    pub species: Vec<String>,
    pub vehicles: Vec<String>,
    pub starships: Vec<String>,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A planet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Planet {
    pub name: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub climate: String,
    pub terrain: String,
    pub population: String,
    pub residents: Vec<String>,
    pub films: Vec<String>,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A starship
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Starship {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub starship_class: String,
    pub pilots: Vec<String>,
    pub films: Vec<String>,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Movie {
    const CATEGORY: Category = Category::Movies;

    fn url(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

impl Entity for Character {
    const CATEGORY: Category = Category::Characters;

    fn url(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Entity for Planet {
    const CATEGORY: Category = Category::Planets;

    fn url(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Entity for Starship {
    const CATEGORY: Category = Category::Starships;

    fn url(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_attributes_survive_round_trip() {
        let raw = json!({
            "name": "Death Star",
            "model": "DS-1 Orbital Battle Station",
            "MGLT": "10",
            "hyperdrive_rating": "4.0",
            "films": ["https://swapi.dev/api/films/1/"],
            "url": "https://swapi.dev/api/starships/9/"
        });

        let ship: Starship = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(ship.extra.get("MGLT"), Some(&json!("10")));

        let back = serde_json::to_value(&ship).unwrap();
        assert_eq!(back["hyperdrive_rating"], raw["hyperdrive_rating"]);
        assert_eq!(back["films"], raw["films"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let movie: Movie = serde_json::from_value(json!({ "title": "A New Hope" })).unwrap();
        assert_eq!(movie.title, "A New Hope");
        assert!(movie.planets.is_empty());
        assert_eq!(movie.display_name(), "A New Hope");
    }
}
