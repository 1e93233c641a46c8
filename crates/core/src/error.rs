use serde::Serialize;
use thiserror::Error;

/// Unified API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("upstream catalog unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("upstream catalog returned malformed data: {0}")]
    UpstreamMalformed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::UpstreamMalformed(_) => "upstream_malformed",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Message safe to show to API clients. Upstream and internal details
    /// stay in the server log.
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(detail) => format!("bad request: {detail}"),
            Self::UpstreamUnavailable(_) => {
                "movie catalog is unavailable, please try again later".to_string()
            }
            Self::UpstreamMalformed(_) => {
                "movie catalog returned an unexpected response".to_string()
            }
            Self::Internal(_) => "internal server error".to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::UpstreamUnavailable(_) | Self::UpstreamMalformed(_) | Self::Internal(_) => 500,
        }
    }
}

/// JSON failure envelope: `{ "success": false, "error": "…" }`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(e: &ApiError) -> Self {
        Self {
            success: false,
            error: e.public_message(),
        }
    }
}
