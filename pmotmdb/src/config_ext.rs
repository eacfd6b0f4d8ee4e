//! Extension pour intégrer TMDB dans pmoconfig
//!
//! Ce module fournit le trait `TmdbConfigExt` qui ajoute à
//! `pmoconfig::Config` les réglages du client TMDB.

use crate::client::{TmdbClient, DEFAULT_API_URL};
use crate::resolver::DEFAULT_SYNOPSIS_LANGUAGE;
use anyhow::{anyhow, Result};
use pmoconfig::Config;
use serde_yaml::Value;

/// Trait d'extension pour gérer la configuration TMDB dans pmoconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::get_config;
/// use pmotmdb::TmdbConfigExt;
///
/// let config = get_config();
/// let client = config.create_tmdb_client()?;
/// ```
pub trait TmdbConfigExt {
    /// Clé d'API TMDB (`tmdb.api_key`), obligatoire
    fn get_tmdb_api_key(&self) -> Result<String>;

    /// URL de base de l'API (`tmdb.api_url`)
    fn get_tmdb_api_url(&self) -> String;

    /// Inclure les films pour adultes dans la recherche (`tmdb.include_adult`, défaut: true)
    fn get_tmdb_include_adult(&self) -> bool;

    /// Langue des synopsis (`tmdb.synopsis_language`, défaut: fr-FR)
    fn get_synopsis_language(&self) -> String;

    /// Crée un client TMDB configuré
    fn create_tmdb_client(&self) -> Result<TmdbClient>;
}

impl TmdbConfigExt for Config {
    fn get_tmdb_api_key(&self) -> Result<String> {
        match self.get_value(&["tmdb", "api_key"]) {
            Ok(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            _ => Err(anyhow!(
                "tmdb.api_key is not set (config.yaml or PMOMOVIEDB_CONFIG__TMDB__API_KEY)"
            )),
        }
    }

    fn get_tmdb_api_url(&self) -> String {
        self.get_string_or(&["tmdb", "api_url"], DEFAULT_API_URL)
    }

    fn get_tmdb_include_adult(&self) -> bool {
        match self.get_value(&["tmdb", "include_adult"]) {
            Ok(Value::Bool(b)) => b,
            _ => true,
        }
    }

    fn get_synopsis_language(&self) -> String {
        self.get_string_or(&["tmdb", "synopsis_language"], DEFAULT_SYNOPSIS_LANGUAGE)
    }

    fn create_tmdb_client(&self) -> Result<TmdbClient> {
        Ok(TmdbClient::builder(self.get_tmdb_api_key()?)
            .api_url(self.get_tmdb_api_url())
            .include_adult(self.get_tmdb_include_adult())
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        assert_eq!(config.get_tmdb_api_url(), DEFAULT_API_URL);
        assert!(config.get_tmdb_include_adult());
        assert_eq!(config.get_synopsis_language(), "fr-FR");
    }

    #[test]
    fn test_api_key_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        assert!(config.get_tmdb_api_key().is_err());
        assert!(config.create_tmdb_client().is_err());

        config
            .set_value(&["tmdb", "api_key"], Value::String("abc123".into()))
            .unwrap();
        assert_eq!(config.get_tmdb_api_key().unwrap(), "abc123");
        assert!(config.create_tmdb_client().is_ok());
    }
}
