//! # pmocache - Cache disque de PMOMovieDB
//!
//! Cette crate fournit le stockage persistant des artefacts résolus
//! (affiches et synopsis) et la dérivation des clés de cache.
//!
//! ## Structure des fichiers
//!
//! ```text
//! cache/
//! ├── w185/
//! │   └── 0f3c…9a.jpg               # Affiche, taille w185
//! ├── original/
//! │   └── 0f3c…9a.jpg
//! └── syn/
//!     └── 0f3c…9a.html              # Synopsis
//! ```
//!
//! La clé (`0f3c…9a`) est le SHA1 hexadécimal de `"{year}|{title}"`.
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use pmocache::{Cache, CacheKey};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cache = Cache::new("./cache");
//!     let key = CacheKey::derive("Fight Club", "1999");
//!
//!     if cache.lookup("w185", &key, "jpg").await.is_none() {
//!         let path = cache.store(b"...", "w185", &key, "jpg").await?;
//!         println!("Stocké dans {:?}", path);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Dépendances principales
//!
//! - `sha1` / `hex` : génération des clés
//! - `tokio` : entrées/sorties asynchrones

pub mod cache;
pub mod error;
pub mod flight;
pub mod key;

pub use cache::{Cache, CacheConfig, is_valid_category};
pub use error::{CacheError, Result};
pub use flight::{FlightGuard, FlightLocks};
pub use key::{CacheKey, KeyFields};
