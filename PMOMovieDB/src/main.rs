use anyhow::Context;
use pmomoviedb::MovieDbExt;
use pmoserver::{LoggingOptions, ServerBuilder};
use pmotmdb::{RemoteResolver, TmdbConfigExt};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ========== PHASE 1 : Configuration et logs ==========
    let config = pmoconfig::get_config();

    let mut server = ServerBuilder::from_config(&config).build();
    server
        .init_logging(LoggingOptions::from_config(&config))
        .await;
    info!("📁 Configuration loaded from {}", config.directory());

    // ========== PHASE 2 : Connexion à TMDB ==========
    // Sans URL de base des images, aucune affiche ne peut être servie :
    // l'échec est fatal.
    let client = config
        .create_tmdb_client()
        .context("Cannot create TMDB client")?;
    info!("🎬 Connecting to TMDB at {}...", client.api_url());
    let resolver = RemoteResolver::connect(Arc::new(client))
        .await
        .context("Cannot read TMDB image configuration")?;

    // ========== PHASE 3 : Proxy et démarrage ==========
    server.init_moviedb_configured(resolver).await?;

    info!("🌐 Starting HTTP server...");
    server.start().await?;

    info!("✅ PMOMovieDB is ready!");
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}
