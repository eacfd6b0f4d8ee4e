//! Implémentation du trait MovieDbExt pour le serveur pmoserver
//!
//! `pmomoviedb` étend `pmoserver::Server` sans que `pmoserver` connaisse
//! `pmomoviedb` : toutes les requêtes qui ne correspondent à aucune autre
//! route passent par le pipeline de résolution.

use crate::{
    MovieDbConfigExt, MovieDbContext, MovieDbExt, ResolutionPipeline, query, response,
};
use axum::{
    Router,
    extract::State,
    http::Uri,
    response::Response,
};
use pmoserver::Server;
use pmotmdb::RemoteResolver;
use std::sync::Arc;
use tracing::{debug, info};

/// Handler unique : chemin → Query → pipeline → réponse
async fn serve_query(State(pipeline): State<Arc<ResolutionPipeline>>, uri: Uri) -> Response {
    debug!("Request {}", uri.path());
    let result = match query::parse(uri.path()) {
        Ok(query) => pipeline.handle(&query).await,
        Err(e) => Err(e),
    };
    response::write_response(result).await
}

/// Router servant toutes les requêtes par le pipeline
pub fn create_router(pipeline: Arc<ResolutionPipeline>) -> Router {
    Router::new().fallback(serve_query).with_state(pipeline)
}

#[async_trait::async_trait]
impl MovieDbExt for Server {
    async fn init_moviedb(&mut self, ctx: MovieDbContext) -> anyhow::Result<Arc<ResolutionPipeline>> {
        info!(
            "Movie cache in {}, fallback image {:?}",
            ctx.cache.cache_dir().display(),
            ctx.fallback_image
        );
        let pipeline = Arc::new(ResolutionPipeline::new(ctx));
        self.add_router("/", create_router(pipeline.clone())).await;
        Ok(pipeline)
    }

    async fn init_moviedb_configured(
        &mut self,
        resolver: RemoteResolver,
    ) -> anyhow::Result<Arc<ResolutionPipeline>> {
        let config = pmoconfig::get_config();
        let ctx = config.create_moviedb_context(resolver)?;
        self.init_moviedb(ctx).await
    }
}
