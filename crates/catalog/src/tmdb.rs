//! TMDB (The Movie Database) catalog client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::time::Duration;

use moviepick_core::types::{MovieSummary, SOURCE_TMDB};
use serde::Deserialize;
use tracing::debug;

use crate::CatalogError;
use crate::provider::{CatalogProvider, DiscoverQuery};

pub const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "zh-CN";
pub const DEFAULT_REGION: &str = "CN";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One movie entry of a TMDB list response.
///
/// `id` and `title` are required; a result without them is a malformed page.
/// The remaining fields are treated as absent when missing or null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl TmdbMovie {
    pub fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title,
            poster_url: self
                .poster_path
                .filter(|p| !p.is_empty())
                .map(|p| format!("{IMAGE_BASE}/w500{p}")),
            rating: self.vote_average.unwrap_or(0.0),
            release_date: self.release_date.unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            source: SOURCE_TMDB.to_string(),
        }
    }
}

/// A paginated TMDB list response. Only `results` is consumed.
#[derive(Debug, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// Connection settings. Not `Debug`, it carries the API key.
#[derive(Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub language: String,
    pub region: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            region: DEFAULT_REGION.to_string(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Unavailable(format!("build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    async fn get_page(
        &self,
        path: &str,
        page: u32,
        params: &[(&str, String)],
    ) -> Result<Vec<TmdbMovie>, CatalogError> {
        let mut all_params = vec![
            ("api_key", self.config.api_key.clone()),
            ("language", self.config.language.clone()),
        ];
        all_params.extend_from_slice(params);
        all_params.push(("page", page.to_string()));

        let url = format!("{}{path}", self.config.base_url);
        debug!(url = %url, page, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key in its query string.
                let e = e.without_url();
                if e.is_timeout() {
                    CatalogError::Unavailable(format!("request timed out: {e}"))
                } else {
                    CatalogError::Unavailable(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status().as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| CatalogError::Unavailable(format!("read body: {}", e.without_url())))?;
        let page: TmdbPage = serde_json::from_slice(&body)
            .map_err(|e| CatalogError::Malformed(format!("parse JSON: {e}")))?;

        debug!(path, results = page.results.len(), "TMDB response");
        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn popular(&self, page: u32) -> Result<Vec<TmdbMovie>, CatalogError> {
        self.get_page("/movie/popular", page, &[]).await
    }

    async fn upcoming(&self, page: u32) -> Result<Vec<TmdbMovie>, CatalogError> {
        self.get_page(
            "/movie/upcoming",
            page,
            &[("region", self.config.region.clone())],
        )
        .await
    }

    async fn top_rated(&self, page: u32) -> Result<Vec<TmdbMovie>, CatalogError> {
        self.get_page("/movie/top_rated", page, &[]).await
    }

    async fn discover(&self, query: &DiscoverQuery) -> Result<Vec<TmdbMovie>, CatalogError> {
        self.get_page(
            "/discover/movie",
            query.page,
            &[
                ("sort_by", query.sort_by.clone()),
                ("with_genres", query.with_genres()),
                ("vote_count.gte", query.min_vote_count.to_string()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use moviepick_core::error::ApiError;
    use serde_json::json;

    use super::*;

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: String, timeout: Duration) -> TmdbClient {
        let mut config = TmdbConfig::new("test-key");
        config.base_url = base_url;
        config.timeout = timeout;
        TmdbClient::new(config).unwrap()
    }

    async fn recording(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
    ) -> axum::Json<serde_json::Value> {
        seen.lock().unwrap().push(params);
        axum::Json(json!({
            "page": 1,
            "results": [
                { "id": 1, "title": "One", "vote_average": 7.5, "poster_path": "/one.jpg" }
            ]
        }))
    }

    #[test]
    fn normalizes_full_record() {
        let movie: TmdbMovie = serde_json::from_value(json!({
            "id": 27205,
            "title": "盗梦空间",
            "poster_path": "/poster.jpg",
            "vote_average": 8.4,
            "release_date": "2010-07-16",
            "overview": "A thief who steals corporate secrets...",
            "genre_ids": [28, 878]
        }))
        .unwrap();

        let summary = movie.into_summary();
        assert_eq!(summary.id, 27205);
        assert_eq!(summary.title, "盗梦空间");
        assert_eq!(
            summary.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert!((summary.rating - 8.4).abs() < f64::EPSILON);
        assert_eq!(summary.release_date, "2010-07-16");
        assert_eq!(summary.source, "TMDB");
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let movie: TmdbMovie =
            serde_json::from_value(json!({ "id": 7, "title": "Bare" })).unwrap();
        let summary = movie.into_summary();
        assert_eq!(summary.poster_url, None);
        assert_eq!(summary.rating, 0.0);
        assert_eq!(summary.release_date, "");
        assert_eq!(summary.overview, "");
    }

    #[test]
    fn null_and_empty_poster_paths_are_absent() {
        for poster in [json!(null), json!("")] {
            let movie: TmdbMovie = serde_json::from_value(json!({
                "id": 7,
                "title": "No Poster",
                "poster_path": poster,
                "vote_average": null,
                "overview": null
            }))
            .unwrap();
            let summary = movie.into_summary();
            assert_eq!(summary.poster_url, None);
            assert_eq!(summary.rating, 0.0);
            assert_eq!(summary.overview, "");
        }
    }

    #[test]
    fn page_without_results_is_empty() {
        let page: TmdbPage = serde_json::from_value(json!({ "page": 1 })).unwrap();
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn discover_sends_genre_filter_and_vote_floor() {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route("/discover/movie", get(recording))
            .with_state(seen.clone());
        let client = client_for(spawn_upstream(app).await, DEFAULT_TIMEOUT);

        let movies = client
            .discover(&DiscoverQuery::by_genres(vec![10749, 878]))
            .await
            .unwrap();
        assert_eq!(movies.len(), 1);

        let params = seen.lock().unwrap()[0].clone();
        assert_eq!(params["with_genres"], "10749|878");
        assert_eq!(params["vote_count.gte"], "100");
        assert_eq!(params["sort_by"], "vote_average.desc");
        assert_eq!(params["api_key"], "test-key");
        assert_eq!(params["language"], "zh-CN");
        assert_eq!(params["page"], "1");
    }

    #[tokio::test]
    async fn upcoming_is_region_filtered() {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route("/movie/upcoming", get(recording))
            .with_state(seen.clone());
        let client = client_for(spawn_upstream(app).await, DEFAULT_TIMEOUT);

        client.upcoming(1).await.unwrap();
        let params = seen.lock().unwrap()[0].clone();
        assert_eq!(params["region"], "CN");
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable() {
        let app = Router::new().route(
            "/movie/popular",
            get(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let client = client_for(spawn_upstream(app).await, DEFAULT_TIMEOUT);

        let err = client.popular(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Status(401)));
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn connection_errors_do_not_leak_api_key() {
        // Reserve a port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = TmdbConfig::new("SECRET-KEY-123");
        config.base_url = format!("http://{addr}");
        let client = TmdbClient::new(config).unwrap();

        let err = client.popular(1).await.unwrap_err();
        assert!(err.is_unavailable());
        let detail = err.to_string();
        assert!(!detail.contains("SECRET-KEY-123"), "leaked key: {detail}");
        assert!(!detail.contains("api_key"), "leaked query: {detail}");

        let envelope = moviepick_core::error::ErrorEnvelope::from(&ApiError::from(err));
        assert!(!envelope.error.contains("SECRET-KEY-123"));
        assert!(!envelope.error.is_empty());
    }

    #[tokio::test]
    async fn slow_upstream_error_omits_url() {
        let app = Router::new().route(
            "/movie/upcoming",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                axum::Json(json!({ "results": [] }))
            }),
        );
        let base = spawn_upstream(app).await;
        let mut config = TmdbConfig::new("SECRET-KEY-123");
        config.base_url = base;
        config.timeout = Duration::from_millis(200);
        let client = TmdbClient::new(config).unwrap();

        let err = client.upcoming(1).await.unwrap_err();
        assert!(!err.to_string().contains("SECRET-KEY-123"));
    }

    #[tokio::test]
    async fn unparseable_body_is_malformed() {
        let app = Router::new().route("/movie/top_rated", get(|| async { "<html>oops</html>" }));
        let client = client_for(spawn_upstream(app).await, DEFAULT_TIMEOUT);

        let err = client.top_rated(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[tokio::test]
    async fn result_without_id_is_malformed() {
        let app = Router::new().route(
            "/movie/top_rated",
            get(|| async { axum::Json(json!({ "results": [{ "title": "No Id" }] })) }),
        );
        let client = client_for(spawn_upstream(app).await, DEFAULT_TIMEOUT);

        let err = client.top_rated(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let app = Router::new().route(
            "/movie/popular",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                axum::Json(json!({ "results": [] }))
            }),
        );
        let client = client_for(spawn_upstream(app).await, Duration::from_millis(200));

        let err = client.popular(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
    }
}
