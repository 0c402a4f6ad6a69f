/// Anime catalog provider abstraction
///
/// The matching workflow only needs two lookups from a catalog: a name search that
/// feeds the autocomplete slots, and a genre search that feeds the match resolver.
/// AniList is the only backend today; the trait keeps the slots and resolver
/// independent of it so tests can script catalog behaviour.
use crate::{error::AppResult, models::MediaRecord};

pub mod anilist;

pub use anilist::AniListProvider;

/// Maximum suggestions returned by a name search
pub const NAME_SEARCH_LIMIT: usize = 5;

/// Maximum candidates returned by a genre search
pub const GENRE_SEARCH_LIMIT: usize = 50;

/// Trait for anime catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search anime by name for autocomplete
    ///
    /// Returns at most [`NAME_SEARCH_LIMIT`] records in catalog order. An empty
    /// name returns an empty list without contacting the catalog.
    async fn search_by_name(&self, name: &str) -> AppResult<Vec<MediaRecord>>;

    /// Search anime filtered by the given genres
    ///
    /// Returns at most [`GENRE_SEARCH_LIMIT`] records, unsorted. Fails with
    /// `InvalidInput` when `genres` is empty, and with `UpstreamUnavailable` when
    /// the catalog cannot be reached, so callers can tell "no matches" apart from
    /// "request failed".
    async fn search_by_genres(&self, genres: &[String]) -> AppResult<Vec<MediaRecord>>;
}
