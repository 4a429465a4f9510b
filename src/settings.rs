use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::utils::http::{parse_proxy, FetchOptions, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::utils::system::get_env;

/// Environment variable holding the subscription URL
pub const SUB_URL_ENV: &str = "SUB_URL";
pub const DEFAULT_CUSTOM_RULES_PATH: &str = "my_rules.yaml";
pub const DEFAULT_OUTPUT_PATH: &str = "config.yaml";

/// Where the subscription document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` URLs are fetched, anything else is a local path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match Url::parse(s) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                Source::Url(s.to_string())
            }
            _ => Source::File(PathBuf::from(s)),
        }
    }

    /// Short form for logs, URLs are cut to keep tokens out of them.
    pub fn redacted(&self) -> String {
        match self {
            Source::Url(url) => {
                let head: String = url.chars().take(30).collect();
                if head.len() < url.len() {
                    format!("{}...", head)
                } else {
                    head
                }
            }
            Source::File(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Configuration for one merge run
#[derive(Debug, Clone)]
pub struct SubmergeConfig {
    /// Subscription to download or read
    pub remote_source: Source,
    /// Local YAML file with a top-level `rules` list
    pub custom_rules_source: PathBuf,
    /// Where the merged config is written
    pub output_destination: PathBuf,
    /// User-Agent sent with the subscription request
    pub user_agent: String,
    /// Request timeout
    pub timeout: Duration,
    /// Proxy for the subscription request
    pub proxy: Option<String>,
}

impl SubmergeConfig {
    pub fn builder() -> SubmergeConfigBuilder {
        SubmergeConfigBuilder::new()
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            proxy: self.proxy.clone(),
        }
    }
}

/// Builder for SubmergeConfig
#[derive(Debug, Clone)]
pub struct SubmergeConfigBuilder {
    remote_source: Option<String>,
    custom_rules_source: PathBuf,
    output_destination: PathBuf,
    user_agent: String,
    timeout: Duration,
    proxy: Option<String>,
}

impl Default for SubmergeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmergeConfigBuilder {
    /// Create a builder with the built-in defaults, no environment lookups
    pub fn new() -> Self {
        SubmergeConfigBuilder {
            remote_source: None,
            custom_rules_source: PathBuf::from(DEFAULT_CUSTOM_RULES_PATH),
            output_destination: PathBuf::from(DEFAULT_OUTPUT_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            proxy: None,
        }
    }

    /// Create a builder seeded from `SUB_URL` and the system proxy variables
    pub fn from_env() -> Self {
        let sub_url = get_env(SUB_URL_ENV);
        Self::new()
            .remote_source_opt((!sub_url.is_empty()).then_some(sub_url))
            .proxy("SYSTEM")
    }

    pub fn remote_source(mut self, source: &str) -> Self {
        self.remote_source = Some(source.to_string());
        self
    }

    /// Override the remote source only when a value is given
    pub fn remote_source_opt(mut self, source: Option<String>) -> Self {
        if source.is_some() {
            self.remote_source = source;
        }
        self
    }

    pub fn custom_rules_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_rules_source = path.into();
        self
    }

    pub fn output_destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_destination = path.into();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Proxy URL, or `SYSTEM` / `NONE`
    pub fn proxy(mut self, proxy: &str) -> Self {
        self.proxy = parse_proxy(proxy);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<SubmergeConfig> {
        let remote = self
            .remote_source
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                Error::MissingInput(format!(
                    "no subscription source, set {} or pass --url",
                    SUB_URL_ENV
                ))
            })?;

        Ok(SubmergeConfig {
            remote_source: Source::parse(&remote),
            custom_rules_source: self.custom_rules_source,
            output_destination: self.output_destination,
            user_agent: self.user_agent,
            timeout: self.timeout,
            proxy: self.proxy,
        })
    }
}
