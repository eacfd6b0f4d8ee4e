//! RemoteResolver against an in-memory metadata source

use async_trait::async_trait;
use pmotmdb::{
    Error, ImagesConfiguration, MetadataSource, MovieCandidate, MovieDetails, RemoteResolver,
    Result,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StubSource {
    images: Option<ImagesConfiguration>,
    results: Vec<MovieCandidate>,
    overview: Option<String>,
    searches: AtomicUsize,
    last_search: Mutex<Option<(String, Option<String>)>>,
    last_language: Mutex<Option<String>>,
}

#[async_trait]
impl MetadataSource for StubSource {
    async fn configuration(&self) -> Result<ImagesConfiguration> {
        self.images
            .clone()
            .ok_or_else(|| Error::Status { url: "configuration".into(), status: 401 })
    }

    async fn search_movie(&self, title: &str, year: Option<&str>) -> Result<Vec<MovieCandidate>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock().unwrap() = Some((title.to_string(), year.map(String::from)));
        Ok(self.results.clone())
    }

    async fn movie_details(&self, id: u64, language: &str) -> Result<MovieDetails> {
        *self.last_language.lock().unwrap() = Some(language.to_string());
        Ok(MovieDetails {
            id,
            title: "stub".into(),
            overview: self.overview.clone(),
        })
    }
}

fn images() -> ImagesConfiguration {
    ImagesConfiguration {
        base_url: "http://image.tmdb.org/t/p/".into(),
        secure_base_url: None,
        poster_sizes: vec!["w92".into(), "w185".into(), "original".into()],
    }
}

fn candidate(id: u64, poster: Option<&str>) -> MovieCandidate {
    MovieCandidate {
        id,
        title: format!("movie {}", id),
        poster_path: poster.map(String::from),
        release_date: None,
    }
}

#[tokio::test]
async fn test_connect_reads_base_url() {
    let source = Arc::new(StubSource {
        images: Some(images()),
        ..Default::default()
    });
    let resolver = RemoteResolver::connect(source).await.unwrap();
    assert_eq!(resolver.image_base_url(), "http://image.tmdb.org/t/p/");
    assert_eq!(resolver.poster_sizes().len(), 3);
}

#[tokio::test]
async fn test_connect_prefers_secure_base_url() {
    let mut conf = images();
    conf.secure_base_url = Some("https://image.tmdb.org/t/p/".into());
    let source = Arc::new(StubSource {
        images: Some(conf),
        ..Default::default()
    });
    let resolver = RemoteResolver::connect(source).await.unwrap();
    assert_eq!(resolver.image_base_url(), "https://image.tmdb.org/t/p/");
}

#[tokio::test]
async fn test_connect_fails_without_configuration() {
    let source = Arc::new(StubSource::default());
    let err = RemoteResolver::connect(source).await.unwrap_err();
    assert!(matches!(err, Error::Startup(_)));
}

#[tokio::test]
async fn test_connect_fails_with_empty_base_url() {
    let source = Arc::new(StubSource {
        images: Some(ImagesConfiguration::default()),
        ..Default::default()
    });
    assert!(matches!(
        RemoteResolver::connect(source).await,
        Err(Error::Startup(_))
    ));
}

#[tokio::test]
async fn test_artwork_url_uses_first_candidate() {
    let source = Arc::new(StubSource {
        results: vec![candidate(550, Some("/a.jpg")), candidate(551, Some("/b.jpg"))],
        ..Default::default()
    });
    let resolver = RemoteResolver::with_images(source.clone(), images());

    let url = resolver
        .resolve_artwork("Fight Club", Some("1999"), "w185")
        .await
        .unwrap();
    assert_eq!(url, "http://image.tmdb.org/t/p/w185/a.jpg");

    let last = source.last_search.lock().unwrap().clone();
    assert_eq!(last, Some(("Fight Club".to_string(), Some("1999".to_string()))));
}

#[tokio::test]
async fn test_artwork_without_year() {
    let source = Arc::new(StubSource {
        results: vec![candidate(1, Some("/x.jpg"))],
        ..Default::default()
    });
    let resolver = RemoteResolver::with_images(source.clone(), images());
    resolver.resolve_artwork("Alien", None, "w92").await.unwrap();

    let last = source.last_search.lock().unwrap().clone();
    assert_eq!(last, Some(("Alien".to_string(), None)));
}

#[tokio::test]
async fn test_no_candidate_is_not_found() {
    let source = Arc::new(StubSource::default());
    let resolver = RemoteResolver::with_images(source.clone(), images());

    let err = resolver.resolve_artwork("Nothing", None, "w185").await.unwrap_err();
    assert!(err.is_not_found());

    let err = resolver
        .resolve_synopsis("Nothing", None, "fr-FR")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(source.searches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_candidate_without_poster_is_not_found() {
    let source = Arc::new(StubSource {
        results: vec![candidate(7, None)],
        ..Default::default()
    });
    let resolver = RemoteResolver::with_images(source, images());
    let err = resolver.resolve_artwork("Obscure", None, "w185").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_synopsis_uses_requested_language() {
    let source = Arc::new(StubSource {
        results: vec![candidate(550, None)],
        overview: Some("Un employé de bureau insomniaque...".into()),
        ..Default::default()
    });
    let resolver = RemoteResolver::with_images(source.clone(), images());

    let text = resolver
        .resolve_synopsis("Fight Club", Some("1999"), "fr-FR")
        .await
        .unwrap();
    assert_eq!(text, "Un employé de bureau insomniaque...");
    assert_eq!(source.last_language.lock().unwrap().as_deref(), Some("fr-FR"));
}

#[tokio::test]
async fn test_missing_overview_is_empty_text() {
    let source = Arc::new(StubSource {
        results: vec![candidate(550, None)],
        overview: None,
        ..Default::default()
    });
    let resolver = RemoteResolver::with_images(source, images());
    let text = resolver.resolve_synopsis("Fight Club", None, "fr-FR").await.unwrap();
    assert!(text.is_empty());
}
