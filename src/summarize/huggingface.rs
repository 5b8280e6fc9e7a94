//! Hugging Face inference API backend (`facebook/bart-large-cnn` by default).
//!
//! Request: `POST {endpoint}` with `Authorization: Bearer <key>` and
//! `{"inputs": "..."}`. The response is either `[{"summary_text": "..."}]`
//! or a bare `{"summary_text": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use super::Summarizer;
use crate::error::{Error, Result, SummarizeError};
use crate::text::truncate_chars;

/// Longest response body snippet kept in errors.
const BODY_SNIPPET: usize = 200;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryText {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<SummaryText>),
    Single(SummaryText),
}

impl InferenceResponse {
    fn into_summary(self) -> Option<String> {
        let text = match self {
            Self::Batch(items) => items.into_iter().next()?.summary_text,
            Self::Single(item) => item.summary_text,
        };
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Abstractive summarizer behind the Hugging Face inference API.
#[derive(Debug, Clone)]
pub struct HuggingFaceSummarizer {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HuggingFaceSummarizer {
    /// Backend POSTing to `endpoint`. An unparseable endpoint is a
    /// configuration error.
    pub fn new(client: Client, endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Configuration(format!("invalid summarization endpoint {endpoint}: {e}")))?;
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// The endpoint requests go to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize_external(&self, text: &str, api_key: &str) -> std::result::Result<String, SummarizeError> {
        let request = InferenceRequest {
            inputs: text,
            options: InferenceOptions { wait_for_model: true },
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SummarizeError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, BODY_SNIPPET).to_string(),
            });
        }

        serde_json::from_str::<InferenceResponse>(&body)
            .ok()
            .and_then(InferenceResponse::into_summary)
            .ok_or_else(|| SummarizeError::MalformedResponse(truncate_chars(&body, BODY_SNIPPET).to_string()))
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}
