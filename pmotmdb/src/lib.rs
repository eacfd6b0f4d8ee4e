//! # pmotmdb - The Movie Database client for PMOMovieDB
//!
//! This crate is the proxy's window on the remote metadata service:
//!
//! - [`TmdbClient`]: HTTP client for the TMDB v3 API (configuration, search, details)
//! - [`MetadataSource`]: the trait the rest of the system depends on
//! - [`RemoteResolver`]: picks the first ranked candidate and turns it into
//!   a poster URL or a synopsis text
//! - [`Fetcher`] / [`HttpFetcher`]: downloads a resolved URL into memory
//!
//! ## Example
//!
//! ```no_run
//! use pmotmdb::{Fetcher, HttpFetcher, RemoteResolver, TmdbClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TmdbClient::builder("my-api-key").build()?;
//!     let resolver = RemoteResolver::connect(Arc::new(client)).await?;
//!
//!     let url = resolver.resolve_artwork("Fight Club", Some("1999"), "w185").await?;
//!     let poster = HttpFetcher::new()?.fetch(&url).await?;
//!     println!("{} bytes", poster.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod fetch;
pub mod models;
pub mod resolver;
pub mod source;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

pub use client::{ClientBuilder, TmdbClient};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use models::{ImagesConfiguration, MovieCandidate, MovieDetails};
pub use resolver::{DEFAULT_SYNOPSIS_LANGUAGE, RemoteResolver};
pub use source::MetadataSource;

#[cfg(feature = "pmoconfig")]
pub use config_ext::TmdbConfigExt;
