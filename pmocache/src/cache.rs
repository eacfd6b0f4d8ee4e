//! Module de gestion du cache disque
//!
//! Le cache est une arborescence `{root}/{category}/{key}.{extension}`.
//! Une entrée est créée à la première résolution réussie, n'est jamais mise
//! à jour sur place et n'est jamais supprimée (pas d'éviction).
//!
//! Les écritures ne sont pas atomiques : une écriture interrompue peut
//! laisser un fichier tronqué qu'un `lookup` ultérieur verra comme un hit.

use crate::error::{CacheError, Result};
use crate::key::CacheKey;
use std::path::{Path, PathBuf};

/// Paramètres statiques d'un type d'entrée du cache.
pub trait CacheConfig: Send + Sync {
    /// Extension des fichiers stockés (ex: `"jpg"`, `"html"`).
    fn file_extension() -> &'static str;
    /// Type MIME servi pour ces fichiers.
    fn content_type() -> &'static str;
}

/// Une catégorie est un seul composant de chemin : `[A-Za-z0-9_]+`
///
/// `w185`, `original` et `syn` passent ; `..`, `a/b` ou `a\b` non.
pub fn is_valid_category(category: &str) -> bool {
    !category.is_empty()
        && category
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Cache de fichiers indexé par (catégorie, clé, extension)
#[derive(Debug, Clone)]
pub struct Cache {
    /// Répertoire racine
    root: PathBuf,
}

impl Cache {
    /// Crée un cache enraciné dans `root`
    ///
    /// Aucun répertoire n'est créé ici : la racine est créée paresseusement
    /// à chaque `lookup`, les catégories à chaque `store`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.root
    }

    /// Construit le chemin d'une entrée : `{root}/{category}/{key}.{extension}`
    ///
    /// Refuse toute catégorie qui sortirait de `{root}/{category}`.
    pub fn file_path(&self, category: &str, key: &CacheKey, extension: &str) -> Result<PathBuf> {
        if !is_valid_category(category) {
            return Err(CacheError::InvalidCategory(category.to_string()));
        }
        Ok(self
            .root
            .join(category)
            .join(format!("{}.{}", key, extension)))
    }

    /// Recherche une entrée
    ///
    /// Retourne le chemin si le fichier existe, `None` sinon. Ni l'intégrité
    /// ni la fraîcheur du fichier ne sont vérifiées.
    pub async fn lookup(&self, category: &str, key: &CacheKey, extension: &str) -> Option<PathBuf> {
        if let Err(e) = tokio::fs::create_dir_all(&self.root).await {
            tracing::warn!("Cannot create cache root {:?}: {}", self.root, e);
        }

        let file = match self.file_path(category, key, extension) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("{}", e);
                return None;
            }
        };
        match tokio::fs::metadata(&file).await {
            Ok(meta) if meta.is_file() => {
                tracing::info!("Data found in cache: {}", file.display());
                Some(file)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::trace!("Cache miss for {:?}: {}", file, e);
                None
            }
        }
    }

    /// Persiste `bytes` et retourne le chemin de l'entrée
    ///
    /// Crée le répertoire de catégorie au besoin et écrase silencieusement
    /// un fichier existant.
    pub async fn store(
        &self,
        bytes: &[u8],
        category: &str,
        key: &CacheKey,
        extension: &str,
    ) -> Result<PathBuf> {
        let filename = self.file_path(category, key, extension)?;

        let dir = self.root.join(category);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| CacheError::Store {
                path: dir.clone(),
                source,
            })?;

        tokio::fs::write(&filename, bytes)
            .await
            .map_err(|source| CacheError::Store {
                path: filename.clone(),
                source,
            })?;

        tracing::info!("Storing {} ({})", filename.display(), bytes.len());
        Ok(filename)
    }
}
