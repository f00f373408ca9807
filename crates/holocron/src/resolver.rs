//! Resolving reference URLs into display values
//!
//! Two policies are available and call sites pick one:
//! - [`resolve_by_id`] looks each referenced entity up individually, all
//!   lookups in flight at once.
//! - [`resolve_by_search`] matches each reference against a collection the
//!   caller already holds. A reference with no match resolves to `""`.
//!
//! Both keep the output aligned position by position with the input.

use std::future::Future;

use futures_util::future::try_join_all;

use crate::error::Result;
use crate::models::Entity;

/// Identifier of the entity a reference URL points at.
///
/// One trailing `/` is ignored, then the last path segment is taken:
/// `https://swapi.dev/api/planets/1/` gives `1`.
pub fn reference_id(url: &str) -> &str {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Resolve every URL through `dereference` and map each result to its display name.
///
/// Fails as soon as any lookup fails; no partial list is produced.
pub async fn resolve_by_id<E, F, Fut>(urls: &[String], dereference: F) -> Result<Vec<String>>
where
    E: Entity,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<E>>,
{
    let lookups = urls
        .iter()
        .map(|url| dereference(reference_id(url).to_string()));
    let entities = try_join_all(lookups).await?;
    Ok(entities
        .iter()
        .map(|entity| entity.display_name().to_string())
        .collect())
}

/// Resolve every URL to the display name of the first entity in `collection`
/// carrying the same identifier, or `""` when none does.
pub fn resolve_by_search<E: Entity>(urls: &[String], collection: &[E]) -> Vec<String> {
    urls.iter()
        .map(|url| {
            let id = reference_id(url);
            collection
                .iter()
                .find(|entity| reference_id(entity.url()) == id)
                .map(|entity| entity.display_name().to_string())
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{Movie, Planet};
    use rand::Rng;
    use std::time::Duration;

    fn planet(id: u32, name: &str) -> Planet {
        Planet {
            name: name.to_string(),
            url: format!("https://swapi.dev/api/planets/{}/", id),
            ..Planet::default()
        }
    }

    fn movie(id: u32, title: &str) -> Movie {
        Movie {
            title: title.to_string(),
            url: format!("https://swapi.dev/api/films/{}/", id),
            ..Movie::default()
        }
    }

    fn urls(ids: &[u32]) -> Vec<String> {
        ids.iter()
            .map(|id| format!("https://swapi.dev/api/planets/{}/", id))
            .collect()
    }

    #[test]
    fn test_reference_id() {
        assert_eq!(reference_id("https://swapi.dev/api/planets/1/"), "1");
        assert_eq!(reference_id("https://swapi.dev/api/planets/12"), "12");
        assert_eq!(reference_id("/starships/9/"), "9");
        assert_eq!(reference_id("42"), "42");
    }

    #[tokio::test]
    async fn test_resolve_by_id_keeps_input_order_under_jitter() {
        let names = ["Tatooine", "Alderaan", "Yavin IV", "Hoth", "Dagobah", "Bespin"];
        let ids: Vec<u32> = vec![4, 1, 6, 2, 5, 3];

        let resolved = resolve_by_id(&urls(&ids), |id: String| async move {
            let delay = rand::thread_rng().gen_range(0..15);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            let n: usize = id.parse().unwrap();
            Ok(planet(n as u32, names[n - 1]))
        })
        .await
        .unwrap();

        assert_eq!(
            resolved,
            vec!["Hoth", "Tatooine", "Bespin", "Alderaan", "Dagobah", "Yavin IV"]
        );
    }

    #[tokio::test]
    async fn test_resolve_by_id_preserves_duplicates() {
        let resolved = resolve_by_id(&urls(&[1, 1]), |id: String| async move {
            Ok(planet(id.parse().unwrap(), "Tatooine"))
        })
        .await
        .unwrap();

        assert_eq!(resolved, vec!["Tatooine", "Tatooine"]);
    }

    #[tokio::test]
    async fn test_resolve_by_id_fails_if_any_lookup_fails() {
        let result = resolve_by_id(&urls(&[1, 2, 3]), |id: String| async move {
            if id == "2" {
                Err(Error::Upstream {
                    url: "https://swapi.dev/api/planets/2".to_string(),
                    status: 503,
                })
            } else {
                Ok(planet(id.parse().unwrap(), "Somewhere"))
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Upstream { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_resolve_by_id_empty() {
        let resolved = resolve_by_id(&[], |_id: String| async move {
            Ok::<Planet, Error>(planet(1, "unused"))
        })
        .await
        .unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_resolve_by_search() {
        let films = vec![
            movie(1, "A New Hope"),
            movie(2, "The Empire Strikes Back"),
            movie(3, "Return of the Jedi"),
        ];
        let refs = vec![
            "https://swapi.dev/api/films/3/".to_string(),
            "https://swapi.dev/api/films/1/".to_string(),
        ];

        assert_eq!(
            resolve_by_search(&refs, &films),
            vec!["Return of the Jedi", "A New Hope"]
        );
    }

    #[test]
    fn test_resolve_by_search_miss_is_empty_string() {
        let films = vec![movie(1, "A New Hope"), movie(10, "Not A Film")];
        let refs = vec![
            "https://swapi.dev/api/films/7/".to_string(),
            "https://swapi.dev/api/films/1/".to_string(),
        ];

        assert_eq!(resolve_by_search(&refs, &films), vec!["", "A New Hope"]);
    }

    #[tokio::test]
    async fn test_policies_agree() {
        let films = vec![movie(1, "A New Hope"), movie(2, "The Empire Strikes Back")];
        let refs: Vec<String> = films.iter().rev().map(|f| f.url.clone()).collect();

        let by_id = resolve_by_id(&refs, |id: String| {
            let found = films.iter().find(|f| reference_id(&f.url) == id).cloned();
            async move { Ok(found.unwrap()) }
        })
        .await
        .unwrap();

        assert_eq!(by_id, resolve_by_search(&refs, &films));
    }
}
