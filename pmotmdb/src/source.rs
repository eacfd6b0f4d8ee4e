//! The remote metadata collaborator seam
//!
//! [`RemoteResolver`](crate::RemoteResolver) only talks to TMDB through this
//! trait, so tests (and alternative backends) can plug their own source.

use crate::error::Result;
use crate::models::{ImagesConfiguration, MovieCandidate, MovieDetails};
use async_trait::async_trait;

/// A movie metadata service returning ranked candidates
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Image configuration (base URL and size tokens)
    async fn configuration(&self) -> Result<ImagesConfiguration>;

    /// Search movies by title, optionally filtered by release year.
    ///
    /// Results keep the service's ranking; an empty list is not an error.
    async fn search_movie(&self, title: &str, year: Option<&str>) -> Result<Vec<MovieCandidate>>;

    /// Full details of one movie in the given language (e.g. `fr-FR`)
    async fn movie_details(&self, id: u64, language: &str) -> Result<MovieDetails>;
}
