//! # pmoserver - Serveur web haut niveau basé sur Axum
//!
//! Cette crate fournit une abstraction simple pour exposer le proxy
//! PMOMovieDB en HTTP.
//!
//! - [`server`] : serveur principal et builder
//! - [`logs`] : initialisation de `tracing` et réglage du niveau à chaud
//!
//! ## Exemple d'utilisation
//!
//! ```rust,no_run
//! use pmoserver::{ServerBuilder, logs::LoggingOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut server = ServerBuilder::new("MyServer", "localhost:9999").build();
//!     server.init_logging(LoggingOptions::default()).await;
//!     server.start().await?;
//!     server.wait().await;
//!     Ok(())
//! }
//! ```

pub mod logs;
pub mod server;

pub use logs::{LogState, LoggingOptions};
pub use server::{Server, ServerBuilder};
