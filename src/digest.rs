//! The URL → digest pipeline.
//!
//! classify → structured provider → fetch → extract → summarize.
//! [`Digester`] is `Send + Sync`; share it behind an `Arc` and call it from
//! as many tasks as needed. Dropping a returned future cancels the request.

use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;

use crate::classifier::is_non_article_domain;
use crate::error::{Error, Result};
use crate::extract::{extract_content, title_of_markup};
use crate::fetch::{build_client, FetchedPage, HttpFetcher, PageFetcher};
use crate::options::{Options, UNTITLED};
use crate::result::{DigestResult, SummarySource};
use crate::summarize::{HuggingFaceSummarizer, ProviderRegistry, StructuredLead, Summarizer, SummaryDispatcher};
use crate::text::{normalize_whitespace, reading_time_minutes, truncate_with_ellipsis, word_count};
use crate::url_utils::{hostname, last_path_segment, parse_absolute};

/// Runs the digest pipeline against injected collaborators.
#[derive(Clone)]
pub struct Digester {
    options: Arc<Options>,
    fetcher: Arc<dyn PageFetcher>,
    dispatcher: SummaryDispatcher,
    providers: ProviderRegistry,
}

impl std::fmt::Debug for Digester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Digester")
            .field("dispatcher", &self.dispatcher)
            .field("providers", &self.providers)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Digester`]; unset collaborators get the HTTP defaults.
#[derive(Default)]
pub struct DigesterBuilder {
    options: Options,
    fetcher: Option<Arc<dyn PageFetcher>>,
    summarizer: Option<Arc<dyn Summarizer>>,
    providers: Option<ProviderRegistry>,
}

impl DigesterBuilder {
    /// Use `fetcher` for page fetches.
    #[must_use]
    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use `summarizer` as the external backend.
    #[must_use]
    pub fn summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Replace the structured provider registry.
    #[must_use]
    pub fn providers(mut self, providers: ProviderRegistry) -> Self {
        self.providers = Some(providers);
        self
    }

    /// Build the digester. Fails with [`Error::Configuration`] when the HTTP
    /// client or summarization endpoint cannot be set up.
    pub fn build(self) -> Result<Digester> {
        let options = Arc::new(self.options);
        let mut client: Option<Client> = None;
        let mut shared_client = || -> Result<Client> {
            if let Some(client) = &client {
                return Ok(client.clone());
            }
            let built = build_client(&options)?;
            client = Some(built.clone());
            Ok(built)
        };

        let fetcher: Arc<dyn PageFetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(shared_client()?, options.fetch_timeout)),
        };
        let summarizer: Arc<dyn Summarizer> = match self.summarizer {
            Some(summarizer) => summarizer,
            None => Arc::new(HuggingFaceSummarizer::new(
                shared_client()?,
                &options.summarization_endpoint,
                options.summarize_timeout,
            )?),
        };
        let providers = match self.providers {
            Some(providers) => providers,
            None => ProviderRegistry::with_defaults(shared_client()?, options.fetch_timeout),
        };

        Ok(Digester {
            dispatcher: SummaryDispatcher::new(summarizer, Arc::clone(&options)),
            options,
            fetcher,
            providers,
        })
    }
}

impl Digester {
    /// Digester with HTTP collaborators built from `options`.
    pub fn new(options: Options) -> Result<Self> {
        Self::builder(options).build()
    }

    /// Start a builder for injecting collaborators.
    #[must_use]
    pub fn builder(options: Options) -> DigesterBuilder {
        DigesterBuilder {
            options,
            ..DigesterBuilder::default()
        }
    }

    /// The options this digester runs with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The summarization dispatcher, for summarizing text directly.
    #[must_use]
    pub fn dispatcher(&self) -> &SummaryDispatcher {
        &self.dispatcher
    }

    /// Fetch, extract and summarize `url`.
    pub async fn digest_url(&self, url: &str) -> Result<DigestResult> {
        let parsed = parse_absolute(url)?;
        let url = parsed.as_str();

        if is_non_article_domain(url, &self.options.non_article_domains) {
            let page = match self.fetcher.fetch_text(url).await {
                Ok(page) if page.is_success() => Some(page),
                Ok(page) => {
                    tracing::debug!(url, status = page.status, "non-article title fetch failed");
                    None
                }
                Err(err) => {
                    tracing::debug!(url, error = %err, "non-article title fetch failed");
                    None
                }
            };
            return Ok(self.non_article(url, page.as_ref().map(|p| p.body.as_str())));
        }

        if self.options.structured_summaries {
            if let Some((provider, lead)) = self.providers.lookup(&parsed).await {
                tracing::info!(url, %provider, "using structured summary");
                return Ok(self.structured(url, &parsed, provider, lead));
            }
        }

        let page = self.fetch_page(url).await?;
        self.digest_article(url, &page.body).await
    }

    /// Digest markup the caller already fetched. `url` is used for
    /// classification and error context only; nothing is fetched.
    pub async fn digest_html(&self, url: &str, html: &str) -> Result<DigestResult> {
        if is_non_article_domain(url, &self.options.non_article_domains) {
            return Ok(self.non_article(url, Some(html)));
        }
        self.digest_article(url, html).await
    }

    /// Title of the page at `url`, or [`UNTITLED`] when it cannot be fetched
    /// or has none. Never fails.
    pub async fn fetch_page_title(&self, url: &str) -> String {
        match self.fetcher.fetch_text(url).await {
            Ok(page) if page.is_success() => title_of_markup(&page.body).unwrap_or_else(|| UNTITLED.to_string()),
            Ok(page) => {
                tracing::debug!(url, status = page.status, "title fetch failed");
                UNTITLED.to_string()
            }
            Err(err) => {
                tracing::debug!(url, error = %err, "title fetch failed");
                UNTITLED.to_string()
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        let page = self.fetcher.fetch_text(url).await?;
        if !page.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", page.status),
            });
        }
        Ok(page)
    }

    async fn digest_article(&self, url: &str, html: &str) -> Result<DigestResult> {
        let extracted = extract_content(html, &self.options, Some(url))?;
        tracing::debug!(url, tier = ?extracted.tier, words = extracted.word_count, "extracted");

        let summary = self.dispatcher.summarize(&extracted.content).await?;
        tracing::info!(url, source = ?summary.source, "digested");

        Ok(DigestResult {
            url: url.to_string(),
            title: extracted.title,
            content: extracted.content,
            excerpt: extracted.excerpt,
            summary: summary.summary,
            source: summary.source,
            word_count: extracted.word_count,
            reading_time_minutes: extracted.reading_time_minutes,
            created_at: Utc::now(),
        })
    }

    fn non_article(&self, url: &str, html: Option<&str>) -> DigestResult {
        let title = html
            .and_then(title_of_markup)
            .or_else(|| hostname(url))
            .unwrap_or_else(|| UNTITLED.to_string());
        tracing::info!(url, %title, "non-article host, skipping summarization");
        self.assemble(url, title.clone(), title.clone(), title, SummarySource::NonArticle)
    }

    fn structured(&self, url: &str, parsed: &url::Url, provider: String, lead: StructuredLead) -> DigestResult {
        let title = lead
            .title
            .or_else(|| last_path_segment(parsed).map(|s| s.replace('_', " ")))
            .unwrap_or_else(|| UNTITLED.to_string());
        let extract = normalize_whitespace(&lead.extract);
        self.assemble(url, title, extract.clone(), extract, SummarySource::Structured(provider))
    }

    fn assemble(&self, url: &str, title: String, content: String, summary: String, source: SummarySource) -> DigestResult {
        let words = word_count(&content);
        DigestResult {
            url: url.to_string(),
            excerpt: truncate_with_ellipsis(&content, self.options.excerpt_len),
            title,
            content,
            summary,
            source,
            word_count: words,
            reading_time_minutes: reading_time_minutes(words),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn digester_is_shareable() {
        assert_send_sync::<Digester>();
    }

    #[test]
    fn default_build_succeeds_without_network() {
        assert!(Digester::new(Options::default()).is_ok());
    }

    #[test]
    fn bad_endpoint_fails_at_build() {
        let options = Options {
            summarization_endpoint: "::nope::".to_string(),
            ..Options::default()
        };
        assert!(matches!(Digester::new(options), Err(Error::Configuration(_))));
    }
}
