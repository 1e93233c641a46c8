use std::path::PathBuf;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use moviepick_core::error::ApiError;
use moviepick_core::types::{DailyList, MovieList};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Build the application router. When `static_dir` is given, the front-end
/// page and its assets are served from it for every non-API path.
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/genres", get(list_genres))
        .route("/movies/hot", get(hot_movies))
        .route("/movies/upcoming", get(upcoming_movies))
        .route("/movies/top-rated", get(top_rated_movies))
        .route("/movies/recommend", post(recommend_movies))
        .route("/movies/daily", get(daily_movies))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GenreListResponse {
    success: bool,
    genres: Vec<String>,
}

async fn list_genres(State(state): State<AppState>) -> Json<GenreListResponse> {
    Json(GenreListResponse {
        success: true,
        genres: state
            .aggregator
            .genres()
            .labels()
            .map(str::to_string)
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

async fn hot_movies(State(state): State<AppState>) -> Result<Json<MovieList>, AppError> {
    let movies = state.aggregator.hot_movies().await?;
    Ok(Json(MovieList::new(movies)))
}

async fn upcoming_movies(State(state): State<AppState>) -> Result<Json<MovieList>, AppError> {
    let movies = state.aggregator.upcoming_movies().await?;
    Ok(Json(MovieList::new(movies)))
}

async fn top_rated_movies(State(state): State<AppState>) -> Result<Json<MovieList>, AppError> {
    let movies = state.aggregator.top_rated_movies().await?;
    Ok(Json(MovieList::new(movies)))
}

#[derive(Deserialize)]
struct RecommendRequest {
    #[serde(default)]
    genres: Vec<String>,
}

async fn recommend_movies(
    State(state): State<AppState>,
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<MovieList>, AppError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let movies = state.aggregator.recommend_movies(body.genres.as_slice()).await?;
    Ok(Json(MovieList::new(movies)))
}

async fn daily_movies(State(state): State<AppState>) -> Result<Json<DailyList>, AppError> {
    let pick = state.aggregator.daily_pick(state.today()).await?;
    Ok(Json(DailyList::new(pick.date, pick.movies)))
}
