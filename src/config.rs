//! Loading [`Options`] from TOML files and `DIGEST_` environment variables.
//!
//! Later sources win: files in the order added, then the environment. The
//! API key may also come from `HUGGINGFACE_API_KEY` when nothing else set it.
//!
//! ```toml
//! summarization_api_key = "hf_..."
//! max_input_chars = 3500
//! non_article_domains = ["youtube.com", "vimeo.com"]
//! fetch_timeout_secs = 10
//! min_paragraph_chars = 60
//! ```

use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::classifier::NonArticleDomainSet;
use crate::error::{Error, Result};
use crate::options::Options;

/// Prefix for environment overrides (`DIGEST_MAX_INPUT_CHARS=3000`).
pub const ENV_PREFIX: &str = "DIGEST";

/// Secondary variable consulted for the API key.
pub const FALLBACK_KEY_VAR: &str = "HUGGINGFACE_API_KEY";

/// File/environment view of [`Options`]. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Bearer credential for the summarization backend. Default: unset.
    pub summarization_api_key: Option<String>,
    /// Summarizer URL. Default: [`crate::DEFAULT_SUMMARIZATION_ENDPOINT`].
    pub summarization_endpoint: Option<String>,
    /// Replaces the whole non-article host list. Default: the built-in list.
    pub non_article_domains: Option<Vec<String>>,
    /// Characters sent to the summarizer. Default: `4000`.
    pub max_input_chars: Option<usize>,
    /// Inputs at most this long skip summarization. Default: `300`.
    pub short_text_threshold: Option<usize>,
    /// Excerpt length in characters. Default: `150`.
    pub excerpt_len: Option<usize>,
    /// Local summary length when the backend fails. Default: `500`.
    pub fallback_summary_chars: Option<usize>,
    /// Cap on the raw-text extraction tier. Default: `3000`.
    pub fallback_text_budget: Option<usize>,
    /// Paragraphs kept for the content. Default: `5`.
    pub max_paragraphs: Option<usize>,
    /// Strict-filter paragraph minimum. Default: `50`.
    pub min_paragraph_chars: Option<usize>,
    /// Relaxed-filter paragraph minimum. Default: `40`.
    pub relaxed_paragraph_chars: Option<usize>,
    /// Page fetch timeout in seconds. Default: `20`.
    pub fetch_timeout_secs: Option<u64>,
    /// Summarizer call timeout in seconds. Default: `60`.
    pub summarize_timeout_secs: Option<u64>,
    /// `User-Agent` for page fetches. Default: `article-digest/<version>`.
    pub user_agent: Option<String>,
    /// Try structured providers (Wikipedia) first. Default: `true`.
    pub structured_summaries: Option<bool>,
}

impl DigestConfig {
    /// Overlay the set fields onto [`Options::default`].
    #[must_use]
    pub fn into_options(self) -> Options {
        let mut options = Options::default();
        if let Some(key) = self.summarization_api_key {
            options.summarization_api_key = Some(key);
        }
        if let Some(endpoint) = self.summarization_endpoint {
            options.summarization_endpoint = endpoint;
        }
        if let Some(domains) = self.non_article_domains {
            options.non_article_domains = NonArticleDomainSet::from(domains);
        }
        if let Some(n) = self.max_input_chars {
            options.max_input_chars = n;
        }
        if let Some(n) = self.short_text_threshold {
            options.short_text_threshold = n;
        }
        if let Some(n) = self.excerpt_len {
            options.excerpt_len = n;
        }
        if let Some(n) = self.fallback_summary_chars {
            options.fallback_summary_chars = n;
        }
        if let Some(n) = self.fallback_text_budget {
            options.fallback_text_budget = n;
        }
        if let Some(n) = self.max_paragraphs {
            options.max_paragraphs = n;
        }
        if let Some(n) = self.min_paragraph_chars {
            options.min_paragraph_chars = n;
        }
        if let Some(n) = self.relaxed_paragraph_chars {
            options.relaxed_paragraph_chars = n;
        }
        if let Some(secs) = self.fetch_timeout_secs {
            options.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.summarize_timeout_secs {
            options.summarize_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = self.user_agent {
            options.user_agent = agent;
        }
        if let Some(enabled) = self.structured_summaries {
            options.structured_summaries = enabled;
        }
        options
    }

    /// Options from `path` (when given) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Options> {
        let loader = match path {
            Some(path) => ConfigLoader::new().with_file(path),
            None => ConfigLoader::new(),
        };
        loader.load_options()
    }

    /// Fill a missing API key from `lookup(FALLBACK_KEY_VAR)`.
    #[must_use]
    pub fn with_key_fallback(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let missing = self.summarization_api_key.as_deref().is_none_or(|k| k.trim().is_empty());
        if missing {
            if let Some(key) = lookup(FALLBACK_KEY_VAR).filter(|k| !k.trim().is_empty()) {
                self.summarization_api_key = Some(key);
            }
        }
        self
    }
}

/// Builder over the `config` crate sources.
pub struct ConfigLoader {
    builder: ::config::ConfigBuilder<::config::builder::DefaultState>,
    use_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader reading only the environment until files are added.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            use_env: true,
        }
    }

    /// Skip `DIGEST_` variables and the key fallback.
    #[must_use]
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Add a required TOML file.
    #[must_use]
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml).required(true));
        self
    }

    /// Add a TOML file that may be absent.
    #[must_use]
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml).required(false));
        self
    }

    /// Merge an inline TOML snippet.
    ///
    /// ```
    /// use article_digest::config::ConfigLoader;
    ///
    /// let cfg = ConfigLoader::new()
    ///     .without_env()
    ///     .with_toml_str("max_input_chars = 1200")
    ///     .load();
    /// assert!(cfg.is_ok_and(|c| c.max_input_chars == Some(1200)));
    /// ```
    #[must_use]
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Merge all sources into a [`DigestConfig`].
    pub fn load(self) -> Result<DigestConfig> {
        let mut builder = self.builder;
        if self.use_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("non_article_domains"),
            );
        }

        let config = builder
            .build()
            .and_then(|config| config.try_deserialize::<DigestConfig>())
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(if self.use_env {
            config.with_key_fallback(|var| std::env::var(var).ok())
        } else {
            config
        })
    }

    /// [`load`](Self::load) then [`DigestConfig::into_options`].
    pub fn load_options(self) -> Result<Options> {
        self.load().map(DigestConfig::into_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_yields_defaults() {
        let options = DigestConfig::default().into_options();
        assert_eq!(options.max_input_chars, Options::default().max_input_chars);
        assert!(options.summarization_api_key.is_none());
    }

    #[test]
    fn key_fallback_only_fills_missing_keys() {
        let lookup = |var: &str| (var == FALLBACK_KEY_VAR).then(|| "hf_env".to_string());

        let cfg = DigestConfig::default().with_key_fallback(lookup);
        assert_eq!(cfg.summarization_api_key.as_deref(), Some("hf_env"));

        let cfg = DigestConfig {
            summarization_api_key: Some("hf_file".to_string()),
            ..DigestConfig::default()
        }
        .with_key_fallback(lookup);
        assert_eq!(cfg.summarization_api_key.as_deref(), Some("hf_file"));
    }

    #[test]
    fn toml_overrides_and_domain_list() {
        let cfg = ConfigLoader::new()
            .without_env()
            .with_toml_str(
                r#"
summarization_api_key = "hf_x"
fetch_timeout_secs = 7
non_article_domains = ["Example.com", "example.com", "video.test"]
structured_summaries = false
"#,
            )
            .load_options();
        let options = match cfg {
            Ok(options) => options,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        };
        assert_eq!(options.api_key(), Some("hf_x"));
        assert_eq!(options.fetch_timeout, Duration::from_secs(7));
        assert!(!options.structured_summaries);
        assert_eq!(
            options.non_article_domains.iter().collect::<Vec<_>>(),
            vec!["example.com", "video.test"]
        );
    }

    #[test]
    fn extraction_thresholds_are_configurable() {
        let cfg = ConfigLoader::new()
            .without_env()
            .with_toml_str("min_paragraph_chars = 60\nrelaxed_paragraph_chars = 25\nfallback_text_budget = 1200\n")
            .load_options();
        let options = match cfg {
            Ok(options) => options,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        };
        assert_eq!(options.min_paragraph_chars, 60);
        assert_eq!(options.relaxed_paragraph_chars, 25);
        assert_eq!(options.fallback_text_budget, 1200);
        assert_eq!(options.max_paragraphs, Options::default().max_paragraphs);
    }

    #[test]
    fn bad_types_are_configuration_errors() {
        let cfg = ConfigLoader::new()
            .without_env()
            .with_toml_str("max_input_chars = \"lots\"")
            .load();
        assert!(matches!(cfg, Err(Error::Configuration(_))));
    }
}
