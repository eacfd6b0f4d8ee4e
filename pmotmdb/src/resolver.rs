//! Resolution of a (title, year) pair into a poster URL or a synopsis
//!
//! Only the first candidate in the collaborator's ranking is used: there is
//! no scoring and no disambiguation between several matches.

use crate::error::{Error, Result};
use crate::models::{ImagesConfiguration, MovieCandidate};
use crate::source::MetadataSource;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Language synopses are requested in unless configured otherwise
pub const DEFAULT_SYNOPSIS_LANGUAGE: &str = "fr-FR";

/// Resolves artwork URLs and synopsis text against a [`MetadataSource`]
///
/// The image base URL is fetched once by [`RemoteResolver::connect`] and is
/// read-only afterwards.
#[derive(Clone)]
pub struct RemoteResolver {
    source: Arc<dyn MetadataSource>,
    images: ImagesConfiguration,
}

impl std::fmt::Debug for RemoteResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteResolver")
            .field("images", &self.images)
            .finish_non_exhaustive()
    }
}

impl RemoteResolver {
    /// Queries the image configuration and builds the resolver
    ///
    /// Fails with [`Error::Startup`] when the configuration cannot be read
    /// or carries no base URL: no artwork URL can be built without it.
    pub async fn connect(source: Arc<dyn MetadataSource>) -> Result<Self> {
        let images = source
            .configuration()
            .await
            .map_err(|e| Error::Startup(format!("cannot read image configuration: {}", e)))?;

        if images.preferred_base_url().is_empty() {
            return Err(Error::Startup(
                "image configuration has no base URL".to_string(),
            ));
        }

        info!(
            "Image base URL: {} (poster sizes: {})",
            images.preferred_base_url(),
            images.poster_sizes.join(", ")
        );

        Ok(Self { source, images })
    }

    /// Builds a resolver from an already known image configuration
    pub fn with_images(source: Arc<dyn MetadataSource>, images: ImagesConfiguration) -> Self {
        Self { source, images }
    }

    pub fn image_base_url(&self) -> &str {
        self.images.preferred_base_url()
    }

    /// Size tokens advertised by the service (informational only)
    pub fn poster_sizes(&self) -> &[String] {
        &self.images.poster_sizes
    }

    async fn first_candidate(&self, title: &str, year: Option<&str>) -> Result<MovieCandidate> {
        let results = self.source.search_movie(title, year).await?;

        match results.into_iter().next() {
            Some(movie) => {
                debug!(
                    "Searching for '{}' year: {}, Found: '{}' [TmdbID:{}]",
                    title,
                    year.unwrap_or(""),
                    movie.title,
                    movie.id
                );
                Ok(movie)
            }
            None => {
                warn!(
                    "Searching for '{}' year: {}, No Data Found",
                    title,
                    year.unwrap_or("")
                );
                Err(Error::not_found(title))
            }
        }
    }

    /// `{image_base_url}{size}{poster_path}` of the first candidate
    pub async fn resolve_artwork(
        &self,
        title: &str,
        year: Option<&str>,
        size: &str,
    ) -> Result<String> {
        let movie = self.first_candidate(title, year).await?;

        let Some(poster_path) = movie.poster_path.filter(|p| !p.is_empty()) else {
            warn!("'{}' [TmdbID:{}] has no poster", movie.title, movie.id);
            return Err(Error::not_found(title));
        };

        Ok(format!("{}{}{}", self.image_base_url(), size, poster_path))
    }

    /// Overview of the first candidate, in `language`
    ///
    /// A candidate without overview yields an empty text, not an error.
    pub async fn resolve_synopsis(
        &self,
        title: &str,
        year: Option<&str>,
        language: &str,
    ) -> Result<String> {
        let movie = self.first_candidate(title, year).await?;
        let details = self.source.movie_details(movie.id, language).await?;
        Ok(details.overview.unwrap_or_default())
    }
}
