pub mod aggregator;
pub mod daily;
pub mod genres;
pub mod provider;
pub mod secondary;
pub mod tmdb;

use moviepick_core::error::ApiError;
use thiserror::Error;

pub use aggregator::{Aggregator, DailyPick};
pub use genres::GenreMap;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Unavailable(String),
    #[error("TMDB returned {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl CatalogError {
    /// Whether the failure belongs to the "upstream unavailable" class
    /// (transport, timeout or non-2xx) rather than a bad payload.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Status(_))
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        if e.is_unavailable() {
            ApiError::UpstreamUnavailable(e.to_string())
        } else {
            ApiError::UpstreamMalformed(e.to_string())
        }
    }
}
