//! Erreurs du pipeline de résolution

use pmocache::CacheError;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Échecs possibles d'une requête
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Chemin mal formé : moins de deux segments
    #[error("Bad Query")]
    BadQuery,

    /// Requête réservée (favicon)
    #[error("Not found")]
    Reserved,

    /// Aucun candidat distant pour la requête
    #[error("No Data Found for '{0}'")]
    NotFound(String),

    /// Téléchargement de la ressource résolue impossible
    #[error("Cannot fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: pmotmdb::Error,
    },

    /// Échec du service de métadonnées (transport, statut, JSON)
    #[error("Remote metadata service failed: {0}")]
    Remote(#[source] pmotmdb::Error),

    /// Écriture du cache impossible (seulement pour les appels qui
    /// doivent retourner un chemin)
    #[error(transparent)]
    Store(#[from] CacheError),

    /// Image de remplacement illisible
    #[error("Cannot read fallback image {path:?}: {source}")]
    Fallback {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Classe une erreur du resolver : `NotFound` reste `NotFound`, le reste
    /// est une panne du service distant.
    pub(crate) fn from_remote(error: pmotmdb::Error) -> Self {
        match error {
            pmotmdb::Error::NotFound(what) => Self::NotFound(what),
            other => Self::Remote(other),
        }
    }
}
