//! HTTP client for the TMDB v3 API
//!
//! # Example
//!
//! ```no_run
//! use pmotmdb::{MetadataSource, TmdbClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TmdbClient::builder("my-api-key").build()?;
//!
//!     let results = client.search_movie("Fight Club", Some("1999")).await?;
//!     if let Some(first) = results.first() {
//!         let details = client.movie_details(first.id, "fr-FR").await?;
//!         println!("{}", details.overview.unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::{
    ConfigurationResponse, ImagesConfiguration, MovieCandidate, MovieDetails, SearchResponse,
};
use crate::source::MetadataSource;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Default TMDB API base URL
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "PMOMovieDB/0.1.0 (pmotmdb)";

/// TMDB HTTP client
///
/// Stateless apart from its connection pool: it caches nothing. The proxy's
/// disk cache lives one layer above, in `pmomoviedb`.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    api_url: String,
    include_adult: bool,
}

impl TmdbClient {
    /// Create a builder for configuring the client
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Builds `{api_url}/{path}?api_key=…&{params}`
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            for (k, v) in params {
                query.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn search_url(&self, title: &str, year: Option<&str>) -> Result<Url> {
        let include_adult = if self.include_adult { "true" } else { "false" };
        let mut params = vec![("query", title), ("include_adult", include_adult)];
        if let Some(year) = year.filter(|y| !y.is_empty()) {
            params.push(("year", year));
        }
        self.endpoint("search/movie", &params)
    }

    /// GET + JSON decoding
    ///
    /// Every error that leaves this function is stripped of the api key:
    /// reqwest errors lose their URL, status errors carry a redacted one.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        if response.status() != StatusCode::OK {
            return Err(Error::Status {
                url: redact_api_key(&url),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MetadataSource for TmdbClient {
    async fn configuration(&self) -> Result<ImagesConfiguration> {
        let url = self.endpoint("configuration", &[])?;
        let conf: ConfigurationResponse = self.get_json(url).await?;
        Ok(conf.images)
    }

    async fn search_movie(&self, title: &str, year: Option<&str>) -> Result<Vec<MovieCandidate>> {
        let url = self.search_url(title, year)?;
        let search: SearchResponse = self.get_json(url).await?;
        debug!(
            "Searching for '{}' year: {}, {} result(s)",
            title,
            year.unwrap_or(""),
            search.results.len()
        );
        Ok(search.results)
    }

    async fn movie_details(&self, id: u64, language: &str) -> Result<MovieDetails> {
        let url = self.endpoint(&format!("movie/{}", id), &[("language", language)])?;
        self.get_json(url).await
    }
}

/// Strips the credential from a URL before it is logged or returned in an error
fn redact_api_key(url: &Url) -> String {
    let mut clean = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == "api_key" {
                (k.into_owned(), "***".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    clean.query_pairs_mut().clear().extend_pairs(pairs);
    clean.to_string()
}

/// Builder for [`TmdbClient`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: String,
    api_url: String,
    include_adult: bool,
    user_agent: String,
}

impl ClientBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            include_adult: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Override the API base URL (used by tests against a local server)
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn include_adult(mut self, include: bool) -> Self {
        self.include_adult = include;
        self
    }

    /// Build the client
    ///
    /// No request timeout is set: a call lasts until the server answers or
    /// the connection fails.
    pub fn build(self) -> Result<TmdbClient> {
        let client = Client::builder().user_agent(self.user_agent).build()?;

        Ok(TmdbClient {
            client,
            api_key: self.api_key,
            api_url: self.api_url,
            include_adult: self.include_adult,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::builder("secret")
            .api_url("http://localhost:1/3/")
            .build()
            .unwrap()
    }

    #[test]
    fn test_search_url_with_year() {
        let url = client().search_url("Fight Club", Some("1999")).unwrap();
        assert_eq!(url.path(), "/3/search/movie");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("query".into(), "Fight Club".into())));
        assert!(pairs.contains(&("year".into(), "1999".into())));
        assert!(pairs.contains(&("include_adult".into(), "true".into())));
        assert!(pairs.contains(&("api_key".into(), "secret".into())));
    }

    #[test]
    fn test_search_url_without_year() {
        let c = client();
        for year in [None, Some("")] {
            let url = c.search_url("Alien", year).unwrap();
            assert!(!url.query_pairs().any(|(k, _)| k == "year"));
        }
    }

    #[test]
    fn test_include_adult_can_be_disabled() {
        let c = TmdbClient::builder("k").include_adult(false).build().unwrap();
        let url = c.search_url("Alien", None).unwrap();
        assert!(url
            .query_pairs()
            .any(|(k, v)| k == "include_adult" && v == "false"));
    }

    #[test]
    fn test_details_url_carries_language() {
        let url = client()
            .endpoint("movie/550", &[("language", "fr-FR")])
            .unwrap();
        assert_eq!(url.path(), "/3/movie/550");
        assert!(url.query_pairs().any(|(k, v)| k == "language" && v == "fr-FR"));
    }

    #[test]
    fn test_redact_api_key() {
        let url = client().search_url("Heat", None).unwrap();
        let redacted = redact_api_key(&url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("query=Heat"));
    }
}
