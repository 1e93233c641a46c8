use std::sync::Arc;

use anyhow::Context;
use moviepick_catalog::Aggregator;
use moviepick_catalog::secondary::EmptyHotList;
use moviepick_catalog::tmdb::TmdbClient;
use moviepick_server::config::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if config.api_key_is_placeholder() {
        warn!("TMDB_API_KEY is not set; upstream catalog requests will fail");
    }

    let genres = config.load_genres()?;
    info!(genres = genres.len(), "genre table loaded");

    let client = TmdbClient::new(config.tmdb.clone()).context("failed to build TMDB client")?;
    info!(
        language = %config.tmdb.language,
        region = %config.tmdb.region,
        timeout_secs = config.tmdb.timeout.as_secs(),
        "TMDB client ready"
    );

    let aggregator = Aggregator::new(Arc::new(client), Arc::new(EmptyHotList), Arc::new(genres));
    let app_state = moviepick_server::state::AppState::new(aggregator);

    let static_dir = if config.static_dir.is_dir() {
        info!(dir = %config.static_dir.display(), "serving static files");
        Some(config.static_dir.clone())
    } else {
        info!(dir = %config.static_dir.display(), "static directory not found, serving API only");
        None
    };

    let app = moviepick_server::routes::build_router(app_state, static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
