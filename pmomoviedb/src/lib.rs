//! # pmomoviedb - Proxy cache-aside pour affiches et synopsis de films
//!
//! Cette crate relie le cache disque (`pmocache`) et le client TMDB
//! (`pmotmdb`) derrière une surface HTTP purement basée sur le chemin :
//!
//! ```text
//! GET /{size}/{title}[/{year}]   → image/jpeg (ou image de remplacement)
//! GET /syn/{title}[/{year}]      → text/html
//! GET /favicon.ico, GET /x       → 404
//! ```
//!
//! ## Utilisation avec pmoserver
//!
//! ```rust,no_run
//! use pmomoviedb::MovieDbExt;
//! use pmoserver::ServerBuilder;
//! use pmotmdb::{RemoteResolver, TmdbClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TmdbClient::builder("my-api-key").build()?;
//!     let resolver = RemoteResolver::connect(Arc::new(client)).await?;
//!
//!     let mut server = ServerBuilder::new("MovieDB", "localhost:9999").build();
//!     server.init_moviedb_configured(resolver).await?;
//!     server.start().await?;
//!     server.wait().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Utilisation comme bibliothèque
//!
//! [`ResolutionPipeline::artwork_path`] et [`ResolutionPipeline::synopsis_path`]
//! retournent le chemin du fichier en cache au lieu de le servir.

pub mod context;
pub mod error;
pub mod formats;
pub mod pipeline;
pub mod query;
pub mod response;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

#[cfg(feature = "pmoserver")]
pub mod pmoserver_ext;

pub use context::{MovieDbContext, PipelineOptions};
pub use error::{PipelineError, Result};
pub use formats::{ArtworkConfig, SynopsisConfig};
pub use pipeline::{ResolutionPipeline, Served};
pub use query::{Query, QueryKind};

#[cfg(feature = "pmoconfig")]
pub use config_ext::MovieDbConfigExt;

#[cfg(feature = "pmoserver")]
pub use pmoserver_ext::create_router;

#[cfg(feature = "pmoserver")]
use std::sync::Arc;

/// Trait pour étendre pmoserver::Server avec le proxy de films
///
/// Le router est monté à la racine et sert toutes les requêtes non
/// routées ailleurs (par exemple `/api/log_setup`).
#[cfg(feature = "pmoserver")]
#[async_trait::async_trait]
pub trait MovieDbExt {
    /// Monte le pipeline construit sur `ctx`
    async fn init_moviedb(
        &mut self,
        ctx: MovieDbContext,
    ) -> anyhow::Result<Arc<ResolutionPipeline>>;

    /// Comme [`MovieDbExt::init_moviedb`], avec le cache et les options
    /// lus dans la configuration globale
    async fn init_moviedb_configured(
        &mut self,
        resolver: pmotmdb::RemoteResolver,
    ) -> anyhow::Result<Arc<ResolutionPipeline>>;
}
