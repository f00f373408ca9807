//! HTTP routes over the catalog

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use holocron::{Catalog, SortKey, SortOrder};
use serde::Deserialize;
use tracing::error;

use crate::client_id::ClientId;
use crate::responses::{
    CharacterResponse, DetailedCharacterResponse, DetailedMovieResponse, ErrorResponse,
    MovieResponse, StatsResponse,
};

/// Build the application router
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/:id", get(movie_details))
        .route("/characters", get(list_characters))
        .route("/characters/:id", get(character_details))
        .route("/health", get(health))
        .route("/stats", get(stats))
        .with_state(catalog)
}

#[derive(Debug, Deserialize)]
struct MoviesQuery {
    sort: Option<String>,
    order: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CharactersQuery {
    movie: Option<String>,
}

/// A failed request, answered with 500 and a fixed message
#[derive(Debug)]
struct ApiError(&'static str);

impl ApiError {
    fn log(message: &'static str) -> impl FnOnce(holocron::Error) -> ApiError {
        move |err| {
            error!("{}: {}", message, err);
            ApiError(message)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse { error: self.0 };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

async fn list_movies(
    State(catalog): State<Arc<Catalog>>,
    client: ClientId,
    Query(query): Query<MoviesQuery>,
) -> Result<Response, ApiError> {
    let movies = catalog
        .get_movies(
            SortKey::from_param(query.sort.as_deref()),
            SortOrder::from_param(query.order.as_deref()),
        )
        .await
        .map_err(ApiError::log("Failed to fetch movies"))?;

    let body: Vec<MovieResponse> = movies.into_iter().map(MovieResponse::from).collect();
    Ok(client.attach(Json(body)))
}

async fn movie_details(
    State(catalog): State<Arc<Catalog>>,
    client: ClientId,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let movie = catalog
        .get_movie(&id, client.as_str())
        .await
        .map_err(ApiError::log("Failed to fetch movie details"))?;

    Ok(client.attach(Json(DetailedMovieResponse::from(movie))))
}

async fn list_characters(
    State(catalog): State<Arc<Catalog>>,
    client: ClientId,
    Query(query): Query<CharactersQuery>,
) -> Result<Response, ApiError> {
    let movie = query.movie.as_deref().filter(|id| !id.is_empty());
    let characters = catalog
        .get_characters_with_filters(movie, client.as_str())
        .await
        .map_err(ApiError::log("Failed to fetch characters"))?;

    let body: Vec<CharacterResponse> = characters
        .into_iter()
        .map(CharacterResponse::from)
        .collect();
    Ok(client.attach(Json(body)))
}

async fn character_details(
    State(catalog): State<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<Json<DetailedCharacterResponse>, ApiError> {
    let character = catalog
        .get_character(&id, true)
        .await
        .map_err(ApiError::log("Failed to fetch character details"))?;

    Ok(Json(DetailedCharacterResponse::from(character)))
}

async fn health() -> &'static str {
    "OK"
}

async fn stats(State(catalog): State<Arc<Catalog>>) -> Json<StatsResponse> {
    Json(StatsResponse::from(catalog.cache().stats().snapshot()))
}
