//! Movie listing order

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::Movie;

/// Attribute movies are sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// `episode_id`
    #[default]
    Episode,
    /// `release_date`
    Release,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first
    Ascending,
    /// Largest first
    #[default]
    Descending,
}

impl SortKey {
    /// Parse a request parameter; anything but `release` sorts by episode
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("release") => SortKey::Release,
            _ => SortKey::Episode,
        }
    }
}

impl SortOrder {
    /// Parse a request parameter; anything but `ascending` sorts descending
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("ascending") => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }
}

/// Sort `movies` in place. Ties keep their existing relative order.
///
/// By release, movies whose date does not parse go after every dated movie
/// in either direction, ordered among themselves by the raw string.
pub fn sort_movies(movies: &mut [Movie], key: SortKey, order: SortOrder) {
    movies.sort_by(|a, b| match key {
        SortKey::Episode => order.apply(a.episode_id.cmp(&b.episode_id)),
        SortKey::Release => compare_release(&a.release_date, &b.release_date, order),
    });
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Compare `YYYY-MM-DD` dates in `order`, undated last
fn compare_release(a: &str, b: &str, order: SortOrder) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(x), Some(y)) => order.apply(x.cmp(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => order.apply(a.cmp(b)),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
