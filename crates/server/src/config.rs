use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use moviepick_catalog::GenreMap;
use moviepick_catalog::tmdb::TmdbConfig;

/// Value used when `TMDB_API_KEY` is not provided. Upstream calls made with
/// it are rejected by TMDB and surface as request failures.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_TMDB_API_KEY";
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
/// Front end shipped with the server crate.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Process configuration, read once from the environment at startup.
#[derive(Clone)]
pub struct Config {
    pub bind: String,
    pub tmdb: TmdbConfig,
    pub static_dir: PathBuf,
    pub genres_file: Option<PathBuf>,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key).and_then(|value| {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            })
        };

        let mut tmdb =
            TmdbConfig::new(var("TMDB_API_KEY").unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string()));
        if let Some(language) = var("MOVIEPICK_LANGUAGE") {
            tmdb.language = language;
        }
        if let Some(region) = var("MOVIEPICK_REGION") {
            tmdb.region = region;
        }
        if let Some(base_url) = var("MOVIEPICK_TMDB_BASE_URL") {
            tmdb.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = var("MOVIEPICK_UPSTREAM_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok())
        {
            tmdb.timeout = Duration::from_secs(secs);
        }

        Self {
            bind: var("MOVIEPICK_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            tmdb,
            static_dir: var("MOVIEPICK_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            genres_file: var("MOVIEPICK_GENRES_FILE").map(PathBuf::from),
            log_json: var("MOVIEPICK_LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        }
    }

    pub fn api_key_is_placeholder(&self) -> bool {
        self.tmdb.api_key == PLACEHOLDER_API_KEY
    }

    /// The genre table: the file named by `MOVIEPICK_GENRES_FILE`, or the built-in one.
    pub fn load_genres(&self) -> anyhow::Result<GenreMap> {
        let Some(path) = &self.genres_file else {
            return Ok(GenreMap::standard());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read genre table {}", path.display()))?;
        GenreMap::from_json(&raw)
            .with_context(|| format!("failed to parse genre table {}", path.display()))
    }
}
