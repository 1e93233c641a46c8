use serde::Serialize;

/// Provider tag stamped on every summary built from TMDB data.
pub const SOURCE_TMDB: &str = "TMDB";

/// Normalized movie record returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(rename = "poster")]
    pub poster_url: Option<String>,
    pub rating: f64,
    pub release_date: String,
    pub overview: String,
    pub source: String,
}

/// Success envelope for list endpoints: `{ "success": true, "movies": [...] }`
#[derive(Debug, Serialize)]
pub struct MovieList {
    pub success: bool,
    pub movies: Vec<MovieSummary>,
}

impl MovieList {
    pub fn new(movies: Vec<MovieSummary>) -> Self {
        Self {
            success: true,
            movies,
        }
    }
}

/// Success envelope for the daily pick.
#[derive(Debug, Serialize)]
pub struct DailyList {
    pub success: bool,
    pub date: String,
    pub movies: Vec<MovieSummary>,
}

impl DailyList {
    pub fn new(date: String, movies: Vec<MovieSummary>) -> Self {
        Self {
            success: true,
            date,
            movies,
        }
    }
}
