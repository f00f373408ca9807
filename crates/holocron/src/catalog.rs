//! Catalog operations served to the HTTP layer

use std::sync::Arc;

use holocache::{CacheAside, CacheKey, VisibilityTracker};
use holostore::KeyValueStore;
use tracing::debug;

use crate::category::Category;
use crate::error::{Error, Result};
use crate::filter::filter_visible;
use crate::models::{Character, Entity, Movie, Planet, Starship};
use crate::pagination::{Paginator, DEFAULT_PAGE_SIZE};
use crate::resolver::{resolve_by_id, resolve_by_search};
use crate::sort::{sort_movies, SortKey, SortOrder};
use crate::upstream::Upstream;

/// Caching aggregator over the upstream catalog.
///
/// Every upstream response goes through one [`CacheAside`]: collections under
/// `<category>`, single entries under `<category>:<id>`. Cached values hold
/// raw upstream entities; resolved names are computed per request.
#[derive(Clone)]
pub struct Catalog {
    cache: CacheAside,
    visits: VisibilityTracker,
    upstream: Arc<dyn Upstream>,
    paginator: Paginator,
}

impl Catalog {
    /// Create a catalog caching into `store`, with the upstream's default page size
    pub fn new(store: Arc<dyn KeyValueStore>, upstream: Arc<dyn Upstream>) -> Self {
        Self::with_page_size(store, upstream, DEFAULT_PAGE_SIZE)
    }

    /// Create a catalog for an upstream serving `page_size` entries per page
    pub fn with_page_size(
        store: Arc<dyn KeyValueStore>,
        upstream: Arc<dyn Upstream>,
        page_size: u64,
    ) -> Self {
        Self {
            cache: CacheAside::new(store.clone()),
            visits: VisibilityTracker::new(store, Category::Movies.cache_name()),
            paginator: Paginator::new(upstream.clone(), page_size),
            upstream,
        }
    }

    /// Cache shared by every operation
    pub fn cache(&self) -> &CacheAside {
        &self.cache
    }

    /// Per-client record of fetched movies
    pub fn visits(&self) -> &VisibilityTracker {
        &self.visits
    }

    /// Every movie, sorted
    pub async fn get_movies(&self, sort: SortKey, order: SortOrder) -> Result<Vec<Movie>> {
        let mut movies: Vec<Movie> = self.collection().await?;
        sort_movies(&mut movies, sort, order);
        Ok(movies)
    }

    /// One movie with its starships, planets and characters resolved to names.
    ///
    /// On success the movie is recorded as visited by `client_id`.
    pub async fn get_movie(&self, id: &str, client_id: &str) -> Result<Movie> {
        let mut movie: Movie = self.entry(id).await?;

        let (starships, planets, characters) = tokio::try_join!(
            self.resolve::<Starship>("starships", &movie.starships),
            self.resolve::<Planet>("planets", &movie.planets),
            self.resolve::<Character>("characters", &movie.characters),
        )?;
        movie.starships = starships;
        movie.planets = planets;
        movie.characters = characters;

        self.visits.record_visit(client_id, id).await;
        debug!("client {} fetched movie {}", client_id, id);
        Ok(movie)
    }

    /// One character, optionally with its film URLs replaced by titles.
    ///
    /// Titles are looked up in the whole movie collection; a film that is not
    /// in the collection resolves to an empty title.
    pub async fn get_character(&self, id: &str, include_film_titles: bool) -> Result<Character> {
        let mut character: Character = self.entry(id).await?;
        if !include_film_titles {
            return Ok(character);
        }

        let movies = self
            .get_movies(SortKey::Release, SortOrder::Ascending)
            .await
            .map_err(|e| Error::resolution("films", e))?;
        character.films = resolve_by_search(&character.films, &movies);
        Ok(character)
    }

    /// Characters appearing in movies any client has caused to be cached,
    /// narrowed to `movie_id` when given.
    pub async fn get_characters(&self, movie_id: Option<&str>) -> Result<Vec<Character>> {
        let characters: Vec<Character> = self.collection().await?;
        let visited = self.visits.visited_across_clients().await;
        Ok(filter_visible(
            characters,
            |c| c.films.as_slice(),
            &visited,
            movie_id,
        ))
    }

    /// Characters appearing in movies `client_id` has fetched, narrowed to
    /// `movie_id` when given.
    pub async fn get_characters_with_filters(
        &self,
        movie_id: Option<&str>,
        client_id: &str,
    ) -> Result<Vec<Character>> {
        let characters: Vec<Character> = self.collection().await?;
        let visited = self.visits.visited(client_id).await;
        Ok(filter_visible(
            characters,
            |c| c.films.as_slice(),
            &visited,
            movie_id,
        ))
    }

    /// One planet
    pub async fn get_planet(&self, id: &str) -> Result<Planet> {
        self.entry(id).await
    }

    /// One starship
    pub async fn get_starship(&self, id: &str) -> Result<Starship> {
        self.entry(id).await
    }

    async fn entry<E: Entity>(&self, id: &str) -> Result<E> {
        let key = CacheKey::entry(E::CATEGORY.cache_name(), id);
        self.cache.try_get(&key, || self.fetch_entry::<E>(id)).await
    }

    async fn collection<E: Entity>(&self) -> Result<Vec<E>> {
        let key = CacheKey::collection(E::CATEGORY.cache_name());
        self.cache
            .try_get(&key, || self.paginator.fetch_all_as::<E>(E::CATEGORY))
            .await
    }

    async fn fetch_entry<E: Entity>(&self, id: &str) -> Result<E> {
        let value = self.upstream.fetch_entry(E::CATEGORY, id).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn resolve<E: Entity>(&self, field: &'static str, urls: &[String]) -> Result<Vec<String>> {
        resolve_by_id(urls, |id| async move { self.entry::<E>(&id).await })
            .await
            .map_err(|e| Error::resolution(field, e))
    }
}
