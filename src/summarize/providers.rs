//! Structured summary providers.
//!
//! Some hosts publish a ready-made lead paragraph. A provider claims hosts
//! and returns that lead; the pipeline then skips fetching and summarizing.
//! Misses and errors fall through to generic extraction.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::SummarizeError;
use crate::text::{normalize_whitespace, truncate_chars};
use crate::url_utils::last_path_segment;

/// A lead paragraph published by the source itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredLead {
    /// Display title, if the provider returned one.
    pub title: Option<String>,
    /// Lead text, whitespace-normalized and non-empty.
    pub extract: String,
}

/// A host-specific source of ready-made summaries.
#[async_trait]
pub trait StructuredSummaryProvider: Send + Sync {
    /// Name recorded in [`crate::SummarySource::Structured`].
    fn name(&self) -> &str;

    /// Whether this provider serves `host` (lowercased).
    fn handles(&self, host: &str) -> bool;

    /// Lead for `url`, `Ok(None)` when the page has none.
    async fn lead(&self, url: &Url) -> Result<Option<StructuredLead>, SummarizeError>;
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    extract: Option<String>,
}

/// Wikipedia REST page summaries (`/api/rest_v1/page/summary/{title}`).
#[derive(Debug, Clone)]
pub struct WikipediaProvider {
    client: Client,
    timeout: Duration,
    base: Option<Url>,
}

impl WikipediaProvider {
    /// Provider querying the same host as the article URL.
    #[must_use]
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            base: None,
        }
    }

    /// Send every lookup to `base` instead of the article's host.
    #[must_use]
    pub fn with_base_url(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    fn summary_url(&self, url: &Url) -> Option<String> {
        let title = last_path_segment(url)?;
        let root = match &self.base {
            Some(base) => base.as_str().trim_end_matches('/').to_string(),
            None => format!("{}://{}", url.scheme(), url.host_str()?),
        };
        Some(format!(
            "{root}/api/rest_v1/page/summary/{}",
            urlencoding::encode(&title)
        ))
    }
}

#[async_trait]
impl StructuredSummaryProvider for WikipediaProvider {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn handles(&self, host: &str) -> bool {
        host == "wikipedia.org" || host.ends_with(".wikipedia.org")
    }

    async fn lead(&self, url: &Url) -> Result<Option<StructuredLead>, SummarizeError> {
        let Some(endpoint) = self.summary_url(url) else {
            return Ok(None);
        };

        tracing::debug!(endpoint, "requesting page summary");
        let response = self
            .client
            .get(&endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, 200).to_string(),
            });
        }

        let summary: PageSummary = response
            .json()
            .await
            .map_err(|e| SummarizeError::MalformedResponse(e.to_string()))?;

        let extract = summary.extract.as_deref().map(normalize_whitespace).unwrap_or_default();
        if extract.is_empty() {
            return Ok(None);
        }
        let title = summary
            .title
            .map(|t| normalize_whitespace(&t))
            .filter(|t| !t.is_empty());
        Ok(Some(StructuredLead { title, extract }))
    }
}

/// Ordered list of providers consulted before generic extraction.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn StructuredSummaryProvider>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.providers.iter().map(|p| p.name())).finish()
    }
}

impl ProviderRegistry {
    /// Registry with no providers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in Wikipedia provider.
    #[must_use]
    pub fn with_defaults(client: Client, timeout: Duration) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(WikipediaProvider::new(client, timeout)));
        registry
    }

    /// Append a provider; earlier registrations win.
    pub fn register(&mut self, provider: Arc<dyn StructuredSummaryProvider>) {
        self.providers.push(provider);
    }

    /// Number of providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// True when no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// First lead any provider claiming `url`'s host returns, with the
    /// provider's name. Provider errors are logged and skipped.
    pub async fn lookup(&self, url: &Url) -> Option<(String, StructuredLead)> {
        let host = url.host_str()?.trim_end_matches('.').to_ascii_lowercase();
        for provider in self.providers.iter().filter(|p| p.handles(&host)) {
            match provider.lead(url).await {
                Ok(Some(lead)) => return Some((provider.name().to_string(), lead)),
                Ok(None) => tracing::debug!(provider = provider.name(), %url, "no structured lead"),
                Err(err) => {
                    tracing::warn!(provider = provider.name(), %url, error = %err, "structured summary failed");
                }
            }
        }
        None
    }
}
