//! # Module Server - API de haut niveau pour Axum
//!
//! Ce module fournit une abstraction simple pour créer le serveur HTTP du
//! proxy, en cachant la configuration du listener et du routage.
//!
//! - **Sous-routers** : montez des routers complets avec `add_router()`
//! - **Logs** : `init_logging()` installe tracing et la route `/api/log_setup`
//! - **Arrêt gracieux** : sur Ctrl+C

use crate::logs::{LogState, LoggingOptions, create_logs_router, init_logging};
use anyhow::{Context, Result};
use axum::Router;
use pmoconfig::Config;
use std::sync::Arc;
use tokio::{signal, sync::RwLock, task::JoinHandle};
use tracing::{error, info};

/// Serveur principal
pub struct Server {
    name: String,
    http_addr: String,
    router: Arc<RwLock<Router>>,
    join_handle: Option<JoinHandle<()>>,
}

impl Server {
    /// Crée une nouvelle instance de serveur
    ///
    /// # Arguments
    ///
    /// * `name` - Nom du serveur (pour les logs)
    /// * `http_addr` - Adresse d'écoute (ex: "localhost:9999")
    pub fn new(name: impl Into<String>, http_addr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            http_addr: http_addr.into(),
            router: Arc::new(RwLock::new(Router::new())),
            join_handle: None,
        }
    }

    /// Ajoute un sous-router au serveur
    ///
    /// - Si `path` est "/", merge directement au router principal
    /// - Sinon, nest le router sous le chemin donné
    pub async fn add_router(&mut self, path: &str, sub_router: Router) {
        let mut r = self.router.write().await;

        *r = if path == "/" {
            std::mem::take(&mut *r).merge(sub_router)
        } else {
            let normalized = format!("/{}", path.trim_start_matches('/'));
            std::mem::take(&mut *r).nest(&normalized, sub_router)
        };
    }

    /// Retourne une copie du router courant (utile pour les tests)
    pub async fn router(&self) -> Router {
        self.router.read().await.clone()
    }

    /// Démarre le serveur HTTP
    ///
    /// Le bind est fait avant de rendre la main : une adresse invalide ou
    /// déjà utilisée remonte comme erreur. Le service tourne ensuite dans une
    /// tâche tokio jusqu'à Ctrl+C.
    pub async fn start(&mut self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.http_addr)
            .await
            .with_context(|| format!("Cannot bind HTTP listener on {}", self.http_addr))?;

        info!("Server {} listening on http://{}", self.name, self.http_addr);

        let router = self.router.read().await.clone();
        let server_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router.into_make_service()).await {
                error!("HTTP server stopped: {}", e);
            }
        });

        let shutdown_task = tokio::spawn(async move {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for ctrl_c: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Ctrl+C reçu, arrêt gracieux");
        });

        self.join_handle = Some(tokio::spawn(async move {
            tokio::select! {
                _ = server_task => {},
                _ = shutdown_task => {},
            }
        }));

        Ok(())
    }

    /// Attend la fin du serveur
    pub async fn wait(&mut self) {
        if let Some(h) = self.join_handle.take() {
            let _ = h.await;
        }
    }

    /// Initialise le système de logging et enregistre `/api/log_setup`
    pub async fn init_logging(&mut self, options: LoggingOptions) -> LogState {
        let log_state = init_logging(options);
        self.add_router("/api", create_logs_router(log_state.clone()))
            .await;
        log_state
    }
}

/// Builder pattern
pub struct ServerBuilder {
    name: String,
    http_addr: String,
}

impl ServerBuilder {
    pub fn new(name: impl Into<String>, http_addr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            http_addr: http_addr.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new("PMO-MovieDB-Server", config.get_http_addr())
    }

    /// Construit le serveur
    pub fn build(self) -> Server {
        Server::new(self.name, self.http_addr)
    }
}
