//! Erreurs du cache disque

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, CacheError>;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Échec d'écriture d'une entrée (répertoire ou fichier)
    #[error("Can't write cache data to {path}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catégorie qui n'est pas un simple nom de répertoire
    #[error("Invalid cache category '{0}'")]
    InvalidCategory(String),
}
