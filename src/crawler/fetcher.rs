use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ScrapeError;

/// One idempotent GET returning the response body. Both crawling services
/// and the review scorer go through this seam, and tests drive them with a
/// canned implementation.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("BechdelScraper/0.1 (research)")
            .timeout(timeout)
            .build()
            .expect("failed to build http client");

        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let res = self.client.get(url).send().await?;

        let status = res.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(ScrapeError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        Ok(res.text().await?)
    }
}
