//! JSON bodies returned to HTTP clients

use holocache::StatsSnapshot;
use holocron::{Character, Movie};
use serde::Serialize;

/// Entry of the movie listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub title: String,
    pub episode: i64,
    pub release_date: String,
}

/// A movie with its references resolved to names
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedMovieResponse {
    pub title: String,
    pub episode: i64,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub characters: Vec<String>,
    pub planets: Vec<String>,
    pub starships: Vec<String>,
}

/// Entry of the character listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    pub name: String,
    pub home_world: String,
}

/// A character with its film titles
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedCharacterResponse {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub gender: String,
    pub hair_color: String,
    pub home_world: String,
    pub skin_color: String,
    pub films: Vec<String>,
}

/// Cache counters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub counters: StatsSnapshot,
    pub hit_ratio: f64,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(counters: StatsSnapshot) -> Self {
        Self {
            hit_ratio: counters.hit_ratio(),
            counters,
        }
    }
}

/// Failure body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            title: movie.title,
            episode: movie.episode_id,
            release_date: movie.release_date,
        }
    }
}

impl From<Movie> for DetailedMovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            title: movie.title,
            episode: movie.episode_id,
            opening_crawl: movie.opening_crawl,
            director: movie.director,
            producer: movie.producer,
            release_date: movie.release_date,
            characters: movie.characters,
            planets: movie.planets,
            starships: movie.starships,
        }
    }
}

impl From<Character> for CharacterResponse {
    fn from(character: Character) -> Self {
        Self {
            name: character.name,
            home_world: character.homeworld,
        }
    }
}

impl From<Character> for DetailedCharacterResponse {
    fn from(character: Character) -> Self {
        Self {
            name: character.name,
            height: character.height,
            mass: character.mass,
            gender: character.gender,
            hair_color: character.hair_color,
            home_world: character.homeworld,
            skin_color: character.skin_color,
            films: character.films,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_response_field_names() {
        let movie = Movie {
            title: "A New Hope".to_string(),
            episode_id: 4,
            release_date: "1977-05-25".to_string(),
            ..Movie::default()
        };

        let body = serde_json::to_value(MovieResponse::from(movie)).unwrap();
        assert_eq!(
            body,
            json!({ "title": "A New Hope", "episode": 4, "releaseDate": "1977-05-25" })
        );
    }

    #[test]
    fn test_character_response_field_names() {
        let character = Character {
            name: "Luke Skywalker".to_string(),
            homeworld: "https://swapi.dev/api/planets/1/".to_string(),
            hair_color: "blond".to_string(),
            ..Character::default()
        };

        let summary = serde_json::to_value(CharacterResponse::from(character.clone())).unwrap();
        assert_eq!(summary["homeWorld"], "https://swapi.dev/api/planets/1/");

        let detail = serde_json::to_value(DetailedCharacterResponse::from(character)).unwrap();
        assert_eq!(detail["hairColor"], "blond");
        assert!(detail.get("hair_color").is_none());
    }
}
