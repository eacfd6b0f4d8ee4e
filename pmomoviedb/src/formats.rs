//! Paramètres de stockage des deux types d'artefacts

use crate::query::QueryKind;
use pmocache::CacheConfig;

/// Affiches : `{root}/{size}/{key}.jpg`
pub struct ArtworkConfig;

impl CacheConfig for ArtworkConfig {
    fn file_extension() -> &'static str {
        "jpg"
    }

    fn content_type() -> &'static str {
        "image/jpeg"
    }
}

/// Synopsis : `{root}/syn/{key}.html`
pub struct SynopsisConfig;

impl CacheConfig for SynopsisConfig {
    fn file_extension() -> &'static str {
        "html"
    }

    fn content_type() -> &'static str {
        "text/html"
    }
}

impl QueryKind {
    pub fn file_extension(self) -> &'static str {
        match self {
            QueryKind::Artwork => ArtworkConfig::file_extension(),
            QueryKind::Synopsis => SynopsisConfig::file_extension(),
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            QueryKind::Artwork => ArtworkConfig::content_type(),
            QueryKind::Synopsis => SynopsisConfig::content_type(),
        }
    }
}
