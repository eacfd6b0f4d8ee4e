//! Pipeline cache-aside
//!
//! ```text
//! Query → clé → lookup ─ hit ──────────────────────────────→ Served::File
//!                      └ miss → resolve → fetch → store ───→ Served::Bytes
//!                                  └ échec (affiche) ──────→ Served::Fallback
//!                                  └ échec (synopsis) ─────→ Err
//! ```
//!
//! Un échec d'écriture du cache est journalisé puis ignoré : la réponse
//! part des octets déjà en mémoire.

use crate::context::MovieDbContext;
use crate::error::{PipelineError, Result};
use crate::query::{Query, QueryKind};
use bytes::Bytes;
use pmocache::{CacheKey, FlightGuard, FlightLocks, is_valid_category};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Issue d'une requête servie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Served {
    /// Hit : fichier déjà présent dans le cache
    File {
        path: PathBuf,
        content_type: &'static str,
    },
    /// Miss résolu : contenu obtenu pour cette requête
    Bytes {
        bytes: Bytes,
        content_type: &'static str,
    },
    /// Aucune affiche n'a pu être obtenue : image de remplacement
    Fallback(PathBuf),
}

pub struct ResolutionPipeline {
    ctx: MovieDbContext,
    flights: FlightLocks,
}

impl ResolutionPipeline {
    pub fn new(ctx: MovieDbContext) -> Self {
        Self {
            ctx,
            flights: FlightLocks::new(),
        }
    }

    pub fn context(&self) -> &MovieDbContext {
        &self.ctx
    }

    /// Clé de cache d'une requête, selon les champs configurés
    pub fn cache_key(&self, query: &Query) -> CacheKey {
        CacheKey::derive_with(
            self.ctx.options.key_fields,
            &query.title,
            query.year_or_empty(),
        )
    }

    /// Sert une requête : hit, miss résolu ou image de remplacement
    pub async fn handle(&self, query: &Query) -> Result<Served> {
        let category = checked_category(query)?;
        let key = self.cache_key(query);
        let extension = query.kind.file_extension();
        let content_type = query.kind.content_type();

        let _flight = self.enter_flight(category, &key, extension).await;

        if let Some(path) = self.ctx.cache.lookup(category, &key, extension).await {
            return Ok(Served::File { path, content_type });
        }

        let bytes = match self.resolve_bytes(query).await {
            Ok(bytes) => bytes,
            Err(e) if query.kind == QueryKind::Artwork => {
                warn!("{}, serving fallback image", e);
                return Ok(Served::Fallback(self.ctx.fallback_image.clone()));
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = self.ctx.cache.store(&bytes, category, &key, extension).await {
            warn!("Cannot store {} in cache: {}", key, e);
        }

        Ok(Served::Bytes {
            bytes,
            content_type,
        })
    }

    /// Chemin de l'affiche en cache, résolue et stockée au besoin
    ///
    /// Pas d'image de remplacement ici : l'échec est retourné à l'appelant.
    pub async fn artwork_path(&self, size: &str, title: &str, year: Option<&str>) -> Result<PathBuf> {
        self.cached_path(&Query::artwork(size, title, year)).await
    }

    /// Chemin du synopsis en cache, résolu et stocké au besoin
    pub async fn synopsis_path(&self, title: &str, year: Option<&str>) -> Result<PathBuf> {
        self.cached_path(&Query::synopsis(title, year)).await
    }

    async fn cached_path(&self, query: &Query) -> Result<PathBuf> {
        let category = checked_category(query)?;
        let key = self.cache_key(query);
        let extension = query.kind.file_extension();

        let _flight = self.enter_flight(category, &key, extension).await;

        if let Some(path) = self.ctx.cache.lookup(category, &key, extension).await {
            return Ok(path);
        }

        let bytes = self.resolve_bytes(query).await?;
        Ok(self.ctx.cache.store(&bytes, category, &key, extension).await?)
    }

    async fn enter_flight(&self, category: &str, key: &CacheKey, extension: &str) -> Option<FlightGuard> {
        if !self.ctx.options.single_flight {
            return None;
        }
        let id = format!("{}/{}.{}", category, key, extension);
        Some(self.flights.acquire(&id).await)
    }

    /// Miss : obtient le contenu à stocker
    async fn resolve_bytes(&self, query: &Query) -> Result<Bytes> {
        let resolver = &self.ctx.resolver;

        match query.kind {
            QueryKind::Artwork => {
                let url = resolver
                    .resolve_artwork(&query.title, query.year_filter(), &query.size_or_category)
                    .await
                    .map_err(PipelineError::from_remote)?;
                debug!("Artwork for '{}' resolved to {}", query.title, url);

                let bytes = self
                    .ctx
                    .fetcher
                    .fetch(&url)
                    .await
                    .map_err(|source| PipelineError::Fetch { url, source })?;
                info!("Fetched {} bytes for '{}'", bytes.len(), query.title);
                Ok(bytes)
            }
            QueryKind::Synopsis => {
                let text = resolver
                    .resolve_synopsis(
                        &query.title,
                        query.year_filter(),
                        &self.ctx.options.synopsis_language,
                    )
                    .await
                    .map_err(PipelineError::from_remote)?;
                Ok(Bytes::from(text))
            }
        }
    }
}

/// Catégorie de cache de la requête, refusée si ce n'est pas un simple nom
fn checked_category(query: &Query) -> Result<&str> {
    let category = query.size_or_category.as_str();
    if is_valid_category(category) {
        Ok(category)
    } else {
        Err(PipelineError::BadQuery)
    }
}
