//! Data models for TMDB API responses
//!
//! Only the fields the proxy needs are deserialized; everything else in
//! the TMDB payloads is ignored.

use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration
// ============================================================================

/// `GET /configuration`
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationResponse {
    pub images: ImagesConfiguration,
}

/// Image section of the TMDB configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImagesConfiguration {
    /// Base URL, e.g. `http://image.tmdb.org/t/p/`
    #[serde(default)]
    pub base_url: String,
    /// HTTPS variant of `base_url`
    #[serde(default)]
    pub secure_base_url: Option<String>,
    /// Size tokens accepted for posters (`w92`, `w185`, …, `original`)
    #[serde(default)]
    pub poster_sizes: Vec<String>,
}

impl ImagesConfiguration {
    /// Base URL to prefix poster paths with (HTTPS when available)
    pub fn preferred_base_url(&self) -> &str {
        match self.secure_base_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => &self.base_url,
        }
    }
}

// ============================================================================
// Search
// ============================================================================

/// `GET /search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<MovieCandidate>,
}

/// One ranked search result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieCandidate {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

// ============================================================================
// Details
// ============================================================================

/// `GET /movie/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
}
