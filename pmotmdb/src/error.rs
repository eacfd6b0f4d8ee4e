//! Error types for the TMDB client

/// Result type alias for TMDB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to TMDB or downloading a resource
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport failed (connection, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200
    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The search returned no candidate
    #[error("No Data Found for '{0}'")]
    NotFound(String),

    /// The image configuration could not be obtained at startup
    #[error("TMDB startup failed: {0}")]
    Startup(String),

    /// Configuration error (from pmoconfig/anyhow)
    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// `true` when the remote service simply had nothing matching
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
