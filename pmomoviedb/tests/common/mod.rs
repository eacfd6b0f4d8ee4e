//! Collaborateurs factices partagés par les tests d'intégration

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use pmocache::Cache;
use pmomoviedb::{MovieDbContext, PipelineOptions};
use pmotmdb::{
    Error, Fetcher, ImagesConfiguration, MetadataSource, MovieCandidate, MovieDetails,
    RemoteResolver, Result,
};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const POSTER_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
pub const FALLBACK_BYTES: &[u8] = b"\x89PNG fallback";
pub const BASE_URL: &str = "http://image.tmdb.org/t/p/";

/// Source de métadonnées en mémoire qui compte ses appels
#[derive(Default)]
pub struct StubSource {
    pub results: Vec<MovieCandidate>,
    pub overview: Option<String>,
    pub fail: bool,
    pub searches: AtomicUsize,
    pub details: AtomicUsize,
}

impl StubSource {
    /// Un seul candidat, avec affiche et synopsis
    pub fn fight_club() -> Self {
        Self {
            results: vec![MovieCandidate {
                id: 550,
                title: "Fight Club".into(),
                poster_path: Some("/fc.jpg".into()),
                release_date: Some("1999-10-15".into()),
            }],
            overview: Some("Le narrateur, sans identité précise...".into()),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.searches.load(Ordering::SeqCst) + self.details.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataSource for StubSource {
    async fn configuration(&self) -> Result<ImagesConfiguration> {
        Ok(images())
    }

    async fn search_movie(&self, _title: &str, _year: Option<&str>) -> Result<Vec<MovieCandidate>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Status {
                url: "search/movie".into(),
                status: 503,
            });
        }
        Ok(self.results.clone())
    }

    async fn movie_details(&self, id: u64, _language: &str) -> Result<MovieDetails> {
        self.details.fetch_add(1, Ordering::SeqCst);
        Ok(MovieDetails {
            id,
            title: "Fight Club".into(),
            overview: self.overview.clone(),
        })
    }
}

/// Fetcher en mémoire qui compte ses appels
pub struct StubFetcher {
    pub bytes: Option<Bytes>,
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl StubFetcher {
    pub fn ok() -> Self {
        Self {
            bytes: Some(Bytes::from_static(POSTER_BYTES)),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::ok()
        }
    }

    pub fn failing() -> Self {
        Self {
            bytes: None,
            ..Self::ok()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.bytes.clone().ok_or_else(|| Error::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

pub fn images() -> ImagesConfiguration {
    ImagesConfiguration {
        base_url: BASE_URL.into(),
        secure_base_url: None,
        poster_sizes: vec!["w92".into(), "w185".into(), "original".into()],
    }
}

/// Contexte complet sur un cache dans `root`, image de remplacement écrite
/// dans `assets`
pub fn context(
    root: &Path,
    assets: &Path,
    source: Arc<StubSource>,
    fetcher: Arc<StubFetcher>,
    options: PipelineOptions,
) -> MovieDbContext {
    let fallback = assets.join("tmdb.png");
    std::fs::write(&fallback, FALLBACK_BYTES).unwrap();

    let resolver = RemoteResolver::with_images(source, images());
    MovieDbContext::new(Cache::new(root), resolver, fetcher, fallback).with_options(options)
}
