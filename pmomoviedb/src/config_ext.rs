//! Extension pour intégrer PMOMovieDB dans pmoconfig
//!
//! Ce module fournit le trait `MovieDbConfigExt` qui lit dans
//! `pmoconfig::Config` les réglages du cache et du pipeline.

use crate::context::{MovieDbContext, PipelineOptions};
use anyhow::{Result, anyhow};
use pmocache::{Cache, KeyFields};
use pmoconfig::Config;
use pmotmdb::{HttpFetcher, RemoteResolver, TmdbConfigExt};
use serde_yaml::Value;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_CACHE_DIR: &str = "cache";
const DEFAULT_FALLBACK_IMAGE: &str = "tmdb.png";

/// Trait d'extension pour la configuration du proxy
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::get_config;
/// use pmomoviedb::MovieDbConfigExt;
///
/// let config = get_config();
/// let ctx = config.create_moviedb_context(resolver)?;
/// ```
pub trait MovieDbConfigExt {
    /// Racine du cache (`moviedb.cache.directory`, défaut: "cache"), créée au besoin
    fn get_moviedb_cache_dir(&self) -> Result<String>;

    /// Image de remplacement (`moviedb.fallback_image`, défaut: "tmdb.png")
    ///
    /// Un chemin relatif est résolu par rapport au répertoire de configuration.
    fn get_fallback_image(&self) -> PathBuf;

    /// Regroupement des miss concurrents (`moviedb.single_flight`, défaut: false)
    fn get_single_flight(&self) -> bool;

    /// Champs de la clé de cache (`moviedb.cache_key_fields`, défaut: "year_title")
    fn get_cache_key_fields(&self) -> Result<KeyFields>;

    /// Options complètes du pipeline
    fn get_pipeline_options(&self) -> Result<PipelineOptions>;

    /// Construit le contexte du proxy autour d'un resolver déjà connecté
    fn create_moviedb_context(&self, resolver: RemoteResolver) -> Result<MovieDbContext>;
}

impl MovieDbConfigExt for Config {
    fn get_moviedb_cache_dir(&self) -> Result<String> {
        self.get_managed_dir(&["moviedb", "cache", "directory"], DEFAULT_CACHE_DIR)
    }

    fn get_fallback_image(&self) -> PathBuf {
        let image = self.get_string_or(&["moviedb", "fallback_image"], DEFAULT_FALLBACK_IMAGE);
        self.resolve_path(&image)
    }

    fn get_single_flight(&self) -> bool {
        matches!(
            self.get_value(&["moviedb", "single_flight"]),
            Ok(Value::Bool(true))
        )
    }

    fn get_cache_key_fields(&self) -> Result<KeyFields> {
        match self.get_value(&["moviedb", "cache_key_fields"]) {
            Ok(Value::String(s)) => s.parse::<KeyFields>().map_err(|e| anyhow!(e)),
            _ => Ok(KeyFields::default()),
        }
    }

    fn get_pipeline_options(&self) -> Result<PipelineOptions> {
        Ok(PipelineOptions {
            key_fields: self.get_cache_key_fields()?,
            synopsis_language: self.get_synopsis_language(),
            single_flight: self.get_single_flight(),
        })
    }

    fn create_moviedb_context(&self, resolver: RemoteResolver) -> Result<MovieDbContext> {
        let cache = Cache::new(self.get_moviedb_cache_dir()?);
        let fetcher = Arc::new(HttpFetcher::new()?);
        Ok(
            MovieDbContext::new(cache, resolver, fetcher, self.get_fallback_image())
                .with_options(self.get_pipeline_options()?),
        )
    }
}
