//! Contexte partagé par toutes les requêtes
//!
//! Construit une seule fois au démarrage puis passé par référence : le
//! cache, le resolver (et son URL de base d'images) et le fetcher ne sont
//! plus jamais modifiés ensuite.

use pmocache::{Cache, KeyFields};
use pmotmdb::{Fetcher, RemoteResolver};
use std::path::PathBuf;
use std::sync::Arc;

pub use pmotmdb::DEFAULT_SYNOPSIS_LANGUAGE;

/// Options du pipeline de résolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Champs de la requête entrant dans la clé de cache
    pub key_fields: KeyFields,
    /// Langue demandée pour les synopsis
    pub synopsis_language: String,
    /// Regroupe les miss concurrents sur une même entrée
    pub single_flight: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            key_fields: KeyFields::default(),
            synopsis_language: DEFAULT_SYNOPSIS_LANGUAGE.to_string(),
            single_flight: false,
        }
    }
}

/// Tout ce dont le pipeline a besoin pour servir une requête
#[derive(Clone)]
pub struct MovieDbContext {
    pub cache: Cache,
    pub resolver: RemoteResolver,
    pub fetcher: Arc<dyn Fetcher>,
    /// Image servie quand aucune affiche ne peut être obtenue
    pub fallback_image: PathBuf,
    pub options: PipelineOptions,
}

impl std::fmt::Debug for MovieDbContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieDbContext")
            .field("cache", &self.cache)
            .field("resolver", &self.resolver)
            .field("fallback_image", &self.fallback_image)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl MovieDbContext {
    pub fn new(
        cache: Cache,
        resolver: RemoteResolver,
        fetcher: Arc<dyn Fetcher>,
        fallback_image: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cache,
            resolver,
            fetcher,
            fallback_image: fallback_image.into(),
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }
}
