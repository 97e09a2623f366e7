//! Settings schema and loader.

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{BrowserType, CacheMode, ContentType};
use crate::crawler::BrowserConfig;
use crate::errors::{CrawlError, Result};

/// Prefix shared by every settings environment variable.
pub const ENV_PREFIX: &str = "C4AI_";

/// Settings for the crawl tools, loaded once per process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Browser type to use.
    pub browser_type: BrowserType,
    /// Run the browser in headless mode.
    pub headless: bool,
    /// Verbose crawler logging, useful during development.
    pub verbose: bool,
    /// Take screenshots of crawled pages.
    pub screenshot: bool,
    /// Minimum word count for a content block to be kept.
    pub word_count_threshold: u32,
    /// Cache mode for the crawler.
    pub cache_mode: CacheMode,
    /// Maximum depth for deep crawling strategies.
    pub max_depth: u32,
    /// Maximum number of pages visited by deep crawling strategies.
    pub max_pages: u32,
    /// Follow links to external domains during breadth-first deep crawls.
    pub include_external: bool,
    /// Representation returned to the caller.
    pub content_type: ContentType,
    /// Base URL of the crawl4ai server.
    pub base_url: String,
    /// Bearer token for the crawl4ai server, if it requires one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Timeout applied to each request sent to the crawl4ai server.
    pub request_timeout_seconds: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            browser_type: BrowserType::default(),
            headless: true,
            verbose: false,
            screenshot: false,
            word_count_threshold: 10,
            cache_mode: CacheMode::default(),
            max_depth: 2,
            max_pages: 50,
            include_external: false,
            content_type: ContentType::default(),
            base_url: "http://localhost:11235".to_string(),
            api_token: None,
            request_timeout_seconds: 120.0,
        }
    }
}

impl Settings {
    /// Loads settings from defaults overlaid with `C4AI_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    /// The figment used by [`Settings::load`].
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    /// Extracts and validates settings from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let settings: Self = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(CrawlError::config("max_pages must be at least 1"));
        }
        if !self.request_timeout_seconds.is_finite() || self.request_timeout_seconds <= 0.0 {
            return Err(CrawlError::config(
                "request_timeout_seconds must be a positive number",
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(CrawlError::config("base_url must not be empty"));
        }
        Ok(())
    }

    /// Browser launch parameters derived from the current settings.
    #[must_use]
    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            browser_type: self.browser_type,
            headless: self.headless,
            verbose: self.verbose,
        }
    }

    /// Timeout for non-streaming crawler requests.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout_seconds)
    }
}
