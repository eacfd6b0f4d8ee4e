//! Download of a resolved resource into memory
//!
//! One attempt per call: any transport failure or any status other than
//! 200 is an error. There is no retry and no timeout.

use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::{error, info};

/// Retrieves the bytes behind a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}

/// [`Fetcher`] backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        info!("Fetching {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("ERROR: {}", e);
            Error::Http(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("ERROR CODE: {} for {}", status.as_u16(), url);
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}
