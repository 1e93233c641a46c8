//! The catalog aggregator: one method per endpoint.
//!
//! Each operation either returns its complete (possibly short) list or a
//! [`CatalogError`]; nothing partial is ever returned.

use std::sync::Arc;

use chrono::NaiveDate;
use moviepick_core::types::MovieSummary;
use tracing::{debug, warn};

use crate::CatalogError;
use crate::daily::{DailyPicker, date_key, take_indices};
use crate::genres::GenreMap;
use crate::provider::{CatalogProvider, DiscoverQuery, HotListSource};
use crate::tmdb::TmdbMovie;

/// Popular results taken from the primary source before merging.
pub const HOT_PRIMARY_LIMIT: usize = 10;
/// Size cap of the merged hot list.
pub const HOT_LIMIT: usize = 20;
/// Size cap of the upcoming, top rated and recommendation lists.
pub const LIST_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyPick {
    pub date: String,
    pub page: u32,
    pub movies: Vec<MovieSummary>,
}

#[derive(Clone)]
pub struct Aggregator {
    catalog: Arc<dyn CatalogProvider>,
    secondary: Arc<dyn HotListSource>,
    genres: Arc<GenreMap>,
}

impl Aggregator {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        secondary: Arc<dyn HotListSource>,
        genres: Arc<GenreMap>,
    ) -> Self {
        Self {
            catalog,
            secondary,
            genres,
        }
    }

    pub fn genres(&self) -> &GenreMap {
        &self.genres
    }

    /// Popular movies merged with the secondary hot list, best rated first.
    pub async fn hot_movies(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        let (primary, secondary) =
            tokio::join!(self.catalog.popular(1), self.secondary.hot_list());

        let mut movies = normalize(primary?, HOT_PRIMARY_LIMIT);
        match secondary {
            Ok(extra) => movies.extend(extra),
            Err(e) => warn!(
                source = self.secondary.name(),
                error = %e,
                "secondary hot list failed, using primary results only"
            ),
        }

        sort_by_rating_desc(&mut movies);
        movies.truncate(HOT_LIMIT);
        Ok(movies)
    }

    pub async fn upcoming_movies(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        let results = self.catalog.upcoming(1).await?;
        Ok(normalize(results, LIST_LIMIT))
    }

    pub async fn top_rated_movies(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        let results = self.catalog.top_rated(1).await?;
        Ok(normalize(results, LIST_LIMIT))
    }

    /// Best rated movies in any of the given genres. Falls back to the top
    /// rated list when no label is recognized.
    pub async fn recommend_movies<S: AsRef<str>>(
        &self,
        labels: &[S],
    ) -> Result<Vec<MovieSummary>, CatalogError> {
        let genre_ids = self.genres.resolve(labels);
        if genre_ids.is_empty() {
            debug!("no known genres requested, falling back to top rated");
            return self.top_rated_movies().await;
        }

        let query = DiscoverQuery::by_genres(genre_ids);
        debug!(
            provider = self.catalog.name(),
            with_genres = %query.with_genres(),
            "genre recommendation"
        );
        let results = self.catalog.discover(&query).await?;
        Ok(normalize(results, LIST_LIMIT))
    }

    /// Deterministic pick of top rated movies for `date`.
    pub async fn daily_pick(&self, date: NaiveDate) -> Result<DailyPick, CatalogError> {
        let key = date_key(date);
        let mut picker = DailyPicker::from_key(&key);
        let page = picker.page();

        let results = self.catalog.top_rated(page).await?;
        let indices = picker.sample_indices(results.len());
        debug!(provider = self.catalog.name(), date = %key, page, ?indices, "daily pick");

        let movies = take_indices(results, &indices)
            .into_iter()
            .map(TmdbMovie::into_summary)
            .collect();

        Ok(DailyPick {
            date: key,
            page,
            movies,
        })
    }
}

fn normalize(results: Vec<TmdbMovie>, limit: usize) -> Vec<MovieSummary> {
    results
        .into_iter()
        .take(limit)
        .map(TmdbMovie::into_summary)
        .collect()
}

/// Stable sort, highest rating first.
fn sort_by_rating_desc(movies: &mut [MovieSummary]) {
    movies.sort_by(|a, b| b.rating.total_cmp(&a.rating));
}
