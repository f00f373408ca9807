//! Scoping listings to visited entries

use crate::resolver::reference_id;

/// Keep the entities referencing at least one visited entry.
///
/// An entity is kept when one of the URLs returned by `references` points at
/// an id in `visited`; with `exact_id` set, that id must also equal
/// `exact_id`. Nothing is kept when `visited` is empty. Input order is
/// preserved.
pub fn filter_visible<E, F>(
    entities: Vec<E>,
    references: F,
    visited: &[String],
    exact_id: Option<&str>,
) -> Vec<E>
where
    F: Fn(&E) -> &[String],
{
    if visited.is_empty() {
        return Vec::new();
    }

    entities
        .into_iter()
        .filter(|entity| {
            references(entity).iter().any(|url| {
                let id = reference_id(url);
                visited.iter().any(|v| v == id) && exact_id.map_or(true, |exact| exact == id)
            })
        })
        .collect()
}
