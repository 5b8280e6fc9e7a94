//! Page fetching.
//!
//! The pipeline only sees the [`PageFetcher`] trait; [`HttpFetcher`] is the
//! `reqwest` implementation. Fetch failures are terminal for a request and
//! there are no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::encoding;
use crate::error::{Error, Result};
use crate::options::Options;

/// A fetched page body and its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Body decoded to UTF-8.
    pub body: String,
    /// HTTP status code.
    pub status: u16,
}

impl FetchedPage {
    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network fetch of arbitrary pages, owned by the surrounding I/O layer.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`. Transport failures are [`Error::Fetch`]; HTTP error
    /// statuses are returned as-is for the caller to judge.
    async fn fetch_text(&self, url: &str) -> Result<FetchedPage>;
}

/// Build the HTTP client shared by the fetcher, summarizer and providers.
pub fn build_client(options: &Options) -> Result<Client> {
    Client::builder()
        .user_agent(options.user_agent.clone())
        .build()
        .map_err(|e| Error::Configuration(format!("HTTP client init failed: {e}")))
}

/// `reqwest`-backed [`PageFetcher`] with a bounded per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Fetcher using `client` and `timeout` per request.
    #[must_use]
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<FetchedPage> {
        let fetch_error = |e: reqwest::Error| Error::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        tracing::debug!(url, "fetching page");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(fetch_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(fetch_error)?;
        tracing::debug!(url, status, bytes = bytes.len(), "page fetched");

        Ok(FetchedPage {
            body: encoding::decode_html(&bytes),
            status,
        })
    }
}
