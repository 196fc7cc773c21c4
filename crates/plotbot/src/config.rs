//! Configuration for the sentiment bot

use crate::error::{PlotbotError, Result};
use plotbot_utils::{EnvLookup, env_lookup, optional_parsed, require_all};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the consumer (API) key
pub const CONSUMER_KEY_VAR: &str = "TWITTER_SENTIMENT_KEY";
/// Environment variable holding the consumer (API) secret
pub const CONSUMER_SECRET_VAR: &str = "TWITTER_SENTIMENT_KEY_SECRET";
/// Environment variable holding the access token
pub const ACCESS_TOKEN_VAR: &str = "TWITTER_SENTIMENT_TOKEN";
/// Environment variable holding the access token secret
pub const ACCESS_TOKEN_SECRET_VAR: &str = "TWITTER_SENTIMENT_TOKEN_SECRET";

const POLL_INTERVAL_VAR: &str = "PLOTBOT_POLL_INTERVAL_SECS";
const CHART_PATH_VAR: &str = "PLOTBOT_CHART_PATH";
const REQUEST_TIMEOUT_VAR: &str = "PLOTBOT_REQUEST_TIMEOUT_SECS";

const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1";
const DEFAULT_UPLOAD_BASE: &str = "https://upload.twitter.com/1.1";
const DEFAULT_STATUS_URL_BASE: &str = "https://twitter.com/statuses";
const DEFAULT_CHART_PATH: &str = "tweet_polarity.png";

/// Largest page the timeline endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 200;

/// OAuth 1.0a user-context credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// Load all four secrets from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&env_lookup)
    }

    /// Load all four secrets through `lookup`
    ///
    /// Fails with every missing variable named when any is unset or blank.
    pub fn from_lookup(lookup: &impl EnvLookup) -> Result<Self> {
        let values = require_all(
            lookup,
            &[
                CONSUMER_KEY_VAR,
                CONSUMER_SECRET_VAR,
                ACCESS_TOKEN_VAR,
                ACCESS_TOKEN_SECRET_VAR,
            ],
        )?;

        let [consumer_key, consumer_secret, access_token, access_token_secret]: [String; 4] =
            values.try_into().map_err(|_| {
                PlotbotError::Configuration("expected exactly four credentials".to_string())
            })?;

        Ok(Self {
            consumer_key,
            consumer_secret,
            access_token,
            access_token_secret,
        })
    }
}

// Secrets stay out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

/// Configuration for the bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Platform credentials
    pub credentials: Credentials,

    /// REST API base URL
    pub api_base: String,

    /// Media upload API base URL
    pub upload_base: String,

    /// Base for public links to individual posts
    pub status_url_base: String,

    /// Sleep between poll rounds
    pub poll_interval: Duration,

    /// Where the chart is written (overwritten every report)
    pub chart_path: PathBuf,

    /// Number of timeline pages fetched per target
    pub timeline_pages: u32,

    /// Posts requested per timeline page
    pub page_size: u32,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl BotConfig {
    /// Create a new configuration builder
    pub fn builder(credentials: Credentials) -> BotConfigBuilder {
        BotConfigBuilder::new(credentials)
    }

    /// Load credentials and optional overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&env_lookup)
    }

    /// Load credentials and optional overrides through `lookup`
    pub fn from_lookup(lookup: &impl EnvLookup) -> Result<Self> {
        let credentials = Credentials::from_lookup(lookup)?;
        let mut builder = Self::builder(credentials);

        if let Some(secs) = optional_parsed::<u64>(lookup, POLL_INTERVAL_VAR)? {
            builder = builder.poll_interval(Duration::from_secs(secs));
        }
        if let Some(path) = optional_parsed::<PathBuf>(lookup, CHART_PATH_VAR)? {
            builder = builder.chart_path(path);
        }
        if let Some(secs) = optional_parsed::<u64>(lookup, REQUEST_TIMEOUT_VAR)? {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(PlotbotError::Configuration(
                "poll_interval must be greater than 0".to_string(),
            ));
        }

        if self.timeline_pages == 0 {
            return Err(PlotbotError::Configuration(
                "timeline_pages must be greater than 0".to_string(),
            ));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(PlotbotError::Configuration(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        if self.chart_path.as_os_str().is_empty() {
            return Err(PlotbotError::Configuration(
                "chart_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for BotConfig
#[derive(Debug)]
pub struct BotConfigBuilder {
    credentials: Credentials,
    api_base: Option<String>,
    upload_base: Option<String>,
    status_url_base: Option<String>,
    poll_interval: Option<Duration>,
    chart_path: Option<PathBuf>,
    timeline_pages: Option<u32>,
    page_size: Option<u32>,
    request_timeout: Option<Duration>,
}

impl BotConfigBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: None,
            upload_base: None,
            status_url_base: None,
            poll_interval: None,
            chart_path: None,
            timeline_pages: None,
            page_size: None,
            request_timeout: None,
        }
    }

    /// Set the REST API base URL
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Set the media upload base URL
    pub fn upload_base(mut self, url: impl Into<String>) -> Self {
        self.upload_base = Some(url.into());
        self
    }

    /// Set the base used for links to posts
    pub fn status_url_base(mut self, url: impl Into<String>) -> Self {
        self.status_url_base = Some(url.into());
        self
    }

    /// Set the sleep between poll rounds
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Set the chart output path
    pub fn chart_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chart_path = Some(path.into());
        self
    }

    /// Set the number of timeline pages fetched per target
    pub fn timeline_pages(mut self, pages: u32) -> Self {
        self.timeline_pages = Some(pages);
        self
    }

    /// Set the posts requested per timeline page
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BotConfig> {
        let config = BotConfig {
            credentials: self.credentials,
            api_base: self.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            upload_base: self
                .upload_base
                .unwrap_or_else(|| DEFAULT_UPLOAD_BASE.to_string()),
            status_url_base: self
                .status_url_base
                .unwrap_or_else(|| DEFAULT_STATUS_URL_BASE.to_string()),
            poll_interval: self.poll_interval.unwrap_or(Duration::from_secs(60)),
            chart_path: self
                .chart_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_PATH)),
            timeline_pages: self.timeline_pages.unwrap_or(5),
            page_size: self.page_size.unwrap_or(100),
            request_timeout: self.request_timeout.unwrap_or(Duration::from_secs(30)),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
pub(crate) fn test_credentials() -> Credentials {
    Credentials {
        consumer_key: "test-consumer-key".to_string(),
        consumer_secret: "test-consumer-secret".to_string(),
        access_token: "test-access-token".to_string(),
        access_token_secret: "test-access-secret".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            (CONSUMER_KEY_VAR, "key"),
            (CONSUMER_SECRET_VAR, "key-secret"),
            (ACCESS_TOKEN_VAR, "token"),
            (ACCESS_TOKEN_SECRET_VAR, "token-secret"),
        ]
    }

    #[test]
    fn test_default_config() {
        let config = BotConfig::builder(test_credentials()).build().unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.timeline_pages, 5);
        assert_eq!(config.page_size, 100);
        assert_eq!(config.chart_path, PathBuf::from("tweet_polarity.png"));
        assert_eq!(config.status_url_base, "https://twitter.com/statuses");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = BotConfig::builder(test_credentials())
            .poll_interval(Duration::from_secs(5))
            .timeline_pages(2)
            .page_size(50)
            .chart_path("/tmp/chart.png")
            .build()
            .unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.timeline_pages, 2);
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(
            BotConfig::builder(test_credentials())
                .poll_interval(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(
            BotConfig::builder(test_credentials())
                .timeline_pages(0)
                .build()
                .is_err()
        );
        assert!(
            BotConfig::builder(test_credentials())
                .page_size(201)
                .build()
                .is_err()
        );
        assert!(
            BotConfig::builder(test_credentials())
                .chart_path("")
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_credentials_from_lookup() {
        let lookup = lookup_from(&full_env());
        let creds = Credentials::from_lookup(&lookup).unwrap();
        assert_eq!(creds.consumer_key, "key");
        assert_eq!(creds.consumer_secret, "key-secret");
        assert_eq!(creds.access_token, "token");
        assert_eq!(creds.access_token_secret, "token-secret");
    }

    #[test]
    fn test_missing_credentials_are_all_named() {
        let lookup = lookup_from(&[(CONSUMER_KEY_VAR, "key"), (ACCESS_TOKEN_VAR, "")]);
        let err = Credentials::from_lookup(&lookup).unwrap_err();
        match err {
            PlotbotError::Configuration(msg) => {
                assert!(msg.contains(CONSUMER_SECRET_VAR));
                assert!(msg.contains(ACCESS_TOKEN_VAR));
                assert!(msg.contains(ACCESS_TOKEN_SECRET_VAR));
            }
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_lookup_overrides() {
        let mut env = full_env();
        env.push((POLL_INTERVAL_VAR, "15"));
        env.push((CHART_PATH_VAR, "out/plot.png"));
        env.push((REQUEST_TIMEOUT_VAR, "7"));
        let config = BotConfig::from_lookup(&lookup_from(&env)).unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert_eq!(config.chart_path, PathBuf::from("out/plot.png"));
        assert_eq!(config.request_timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_from_lookup_invalid_override() {
        let mut env = full_env();
        env.push((POLL_INTERVAL_VAR, "soon"));
        assert!(matches!(
            BotConfig::from_lookup(&lookup_from(&env)),
            Err(PlotbotError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", test_credentials());
        assert!(!rendered.contains("test-access-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
