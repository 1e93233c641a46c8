use moviepick_core::types::MovieSummary;

use crate::CatalogError;
use crate::tmdb::TmdbMovie;

/// Minimum vote count a title needs before it is considered for genre recommendations.
pub const MIN_VOTE_COUNT: u32 = 100;

/// Sort order used for genre recommendations.
pub const SORT_BY_RATING_DESC: &str = "vote_average.desc";

/// An upstream movie catalog. Every method returns one page of raw results.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Currently popular movies.
    async fn popular(&self, page: u32) -> Result<Vec<TmdbMovie>, CatalogError>;

    /// Upcoming releases in the configured region.
    async fn upcoming(&self, page: u32) -> Result<Vec<TmdbMovie>, CatalogError>;

    /// All-time top rated movies.
    async fn top_rated(&self, page: u32) -> Result<Vec<TmdbMovie>, CatalogError>;

    /// Filtered discovery query.
    async fn discover(&self, query: &DiscoverQuery) -> Result<Vec<TmdbMovie>, CatalogError>;
}

/// A secondary hot list merged into the popular movies.
///
/// Failures here never fail the request; the aggregator logs them and
/// continues with the primary list.
#[async_trait::async_trait]
pub trait HotListSource: Send + Sync {
    fn name(&self) -> &str;

    async fn hot_list(&self) -> Result<Vec<MovieSummary>, CatalogError>;
}

/// Parameters for the upstream discover endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverQuery {
    /// Genre identifiers, matched with OR semantics.
    pub genre_ids: Vec<u32>,
    pub sort_by: String,
    pub min_vote_count: u32,
    pub page: u32,
}

impl DiscoverQuery {
    /// Best-rated movies in any of the given genres.
    pub fn by_genres(genre_ids: Vec<u32>) -> Self {
        Self {
            genre_ids,
            sort_by: SORT_BY_RATING_DESC.to_string(),
            min_vote_count: MIN_VOTE_COUNT,
            page: 1,
        }
    }

    /// The `with_genres` filter value. TMDB treats `|` as OR.
    pub fn with_genres(&self) -> String {
        self.genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}
