//! Browser and run configuration sent to the crawler.
//!
//! The crawl4ai server deserializes configuration objects written as
//! `{"type": "<ClassName>", "params": {...}}`; the `to_payload` methods
//! produce exactly that form.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::{BrowserType, CacheMode, Settings};

/// Timezone reported to pages by the browser.
pub const STEALTH_TIMEZONE: &str = "America/Los_Angeles";

/// User-agent mode asking the crawler for a randomized client identity.
pub const RANDOM_USER_AGENT: &str = "random";

/// Relevance weight applied to keyword scoring in best-first crawls.
pub const KEYWORD_WEIGHT: f64 = 0.7;

/// Browser launch parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Browser engine.
    pub browser_type: BrowserType,
    /// Headless mode.
    pub headless: bool,
    /// Verbose browser logging.
    pub verbose: bool,
}

impl BrowserConfig {
    /// Converts to the crawler's typed wire form.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        json!({
            "type": "BrowserConfig",
            "params": {
                "browser_type": self.browser_type.to_string(),
                "headless": self.headless,
                "verbose": self.verbose,
            }
        })
    }
}

/// Geolocation the browser reports to pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Accuracy in meters.
    pub accuracy: f64,
}

impl GeolocationConfig {
    /// Downtown Los Angeles, matching [`STEALTH_TIMEZONE`].
    #[must_use]
    pub const fn los_angeles() -> Self {
        Self {
            latitude: 34.0522,
            longitude: -118.2437,
            accuracy: 10.0,
        }
    }

    /// Converts to the crawler's typed wire form.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        json!({
            "type": "GeolocationConfig",
            "params": {
                "latitude": self.latitude,
                "longitude": self.longitude,
                "accuracy": self.accuracy,
            }
        })
    }
}

/// Scores discovered URLs by keyword matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRelevanceScorer {
    /// Keywords to look for.
    pub keywords: Vec<String>,
    /// Weight of the score.
    pub weight: f64,
}

impl KeywordRelevanceScorer {
    /// Creates a scorer with the default weight.
    #[must_use]
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            weight: KEYWORD_WEIGHT,
        }
    }

    /// Converts to the crawler's typed wire form.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        json!({
            "type": "KeywordRelevanceScorer",
            "params": {
                "keywords": self.keywords,
                "weight": self.weight,
            }
        })
    }
}

/// Traversal strategy for deep crawls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeepCrawlStrategy {
    /// Visit pages level by level.
    BreadthFirst {
        /// Maximum link depth from the start URL.
        max_depth: u32,
        /// Maximum number of pages.
        max_pages: u32,
        /// Follow links to other domains.
        include_external: bool,
    },
    /// Visit the highest-scoring pages first.
    BestFirst {
        /// Maximum link depth from the start URL.
        max_depth: u32,
        /// Maximum number of pages.
        max_pages: u32,
        /// Follow links to other domains.
        include_external: bool,
        /// URL scorer ranking the frontier.
        scorer: KeywordRelevanceScorer,
    },
}

impl DeepCrawlStrategy {
    /// Picks best-first when keywords are given, breadth-first otherwise.
    #[must_use]
    pub fn for_keywords(keywords: Option<&[String]>, settings: &Settings) -> Self {
        match keywords {
            Some(keywords) if !keywords.is_empty() => Self::BestFirst {
                max_depth: settings.max_depth,
                max_pages: settings.max_pages,
                include_external: false,
                scorer: KeywordRelevanceScorer::new(keywords.to_vec()),
            },
            _ => Self::BreadthFirst {
                max_depth: settings.max_depth,
                max_pages: settings.max_pages,
                include_external: settings.include_external,
            },
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BreadthFirst { .. } => "bfs",
            Self::BestFirst { .. } => "best_first",
        }
    }

    /// Converts to the crawler's typed wire form.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        match self {
            Self::BreadthFirst {
                max_depth,
                max_pages,
                include_external,
            } => json!({
                "type": "BFSDeepCrawlStrategy",
                "params": {
                    "max_depth": max_depth,
                    "max_pages": max_pages,
                    "include_external": include_external,
                }
            }),
            Self::BestFirst {
                max_depth,
                max_pages,
                include_external,
                scorer,
            } => json!({
                "type": "BestFirstCrawlingStrategy",
                "params": {
                    "max_depth": max_depth,
                    "max_pages": max_pages,
                    "include_external": include_external,
                    "url_scorer": scorer.to_payload(),
                }
            }),
        }
    }
}

/// Per-call crawler configuration.
///
/// Unset optional fields are left to the crawler's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlerRunConfig {
    /// Deliver results as they are produced.
    pub stream: bool,
    /// Cache behaviour.
    pub cache_mode: CacheMode,
    /// Minimum words per content block.
    pub word_count_threshold: u32,
    /// Capture a screenshot of each page.
    pub screenshot: bool,
    /// Verbose crawler logging.
    pub verbose: bool,
    /// User-agent mode.
    pub user_agent_mode: Option<String>,
    /// Simulate human interaction.
    pub simulate_user: bool,
    /// Timezone reported to pages.
    pub timezone_id: Option<String>,
    /// Geolocation reported to pages.
    pub geolocation: Option<GeolocationConfig>,
    /// HTML attributes kept when cleaning markup.
    pub keep_attrs: Vec<String>,
    /// Keep `data-*` attributes.
    pub keep_data_attributes: Option<bool>,
    /// Seconds to wait before capturing HTML.
    pub delay_before_return_html: Option<f64>,
    /// Drop links to other domains.
    pub exclude_external_links: Option<bool>,
    /// Drop links to social media sites.
    pub exclude_social_media_links: Option<bool>,
    /// Inline iframe content.
    pub process_iframes: Option<bool>,
    /// Remove popups and overlays.
    pub remove_overlay_elements: Option<bool>,
    /// Heuristic anti-bot handling.
    pub magic: Option<bool>,
    /// Deep-crawl strategy, if any.
    pub deep_crawl_strategy: Option<DeepCrawlStrategy>,
}

impl CrawlerRunConfig {
    /// Base configuration shared by every tool: settings-driven cache and
    /// filtering, anti-detection parameters, and streaming on.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            stream: true,
            cache_mode: settings.cache_mode,
            word_count_threshold: settings.word_count_threshold,
            screenshot: settings.screenshot,
            verbose: settings.verbose,
            user_agent_mode: Some(RANDOM_USER_AGENT.to_string()),
            simulate_user: true,
            timezone_id: Some(STEALTH_TIMEZONE.to_string()),
            geolocation: Some(GeolocationConfig::los_angeles()),
            keep_attrs: Vec::new(),
            keep_data_attributes: None,
            delay_before_return_html: None,
            exclude_external_links: None,
            exclude_social_media_links: None,
            process_iframes: None,
            remove_overlay_elements: None,
            magic: None,
            deep_crawl_strategy: None,
        }
    }

    /// Sets the deep-crawl strategy.
    #[must_use]
    pub fn with_deep_crawl_strategy(mut self, strategy: DeepCrawlStrategy) -> Self {
        self.deep_crawl_strategy = Some(strategy);
        self
    }

    /// Sets the attributes kept when cleaning markup.
    #[must_use]
    pub fn with_keep_attrs(mut self, attrs: &[&str]) -> Self {
        self.keep_attrs = attrs.iter().map(|a| (*a).to_string()).collect();
        self
    }

    /// Whether the crawler should answer with a result stream.
    #[must_use]
    pub fn streams_pages(&self) -> bool {
        self.stream && self.deep_crawl_strategy.is_some()
    }

    /// Converts to the crawler's typed wire form.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let mut params = Map::new();
        params.insert("stream".into(), json!(self.stream));
        params.insert(
            "cache_mode".into(),
            json!({"type": "CacheMode", "params": self.cache_mode.as_str()}),
        );
        params.insert("word_count_threshold".into(), json!(self.word_count_threshold));
        params.insert("screenshot".into(), json!(self.screenshot));
        params.insert("verbose".into(), json!(self.verbose));
        params.insert("simulate_user".into(), json!(self.simulate_user));

        if let Some(ref mode) = self.user_agent_mode {
            params.insert("user_agent_mode".into(), json!(mode));
        }
        if let Some(ref tz) = self.timezone_id {
            params.insert("timezone_id".into(), json!(tz));
        }
        if let Some(ref geo) = self.geolocation {
            params.insert("geolocation".into(), geo.to_payload());
        }
        if !self.keep_attrs.is_empty() {
            params.insert("keep_attrs".into(), json!(self.keep_attrs));
        }

        let flags = [
            ("keep_data_attributes", self.keep_data_attributes),
            ("exclude_external_links", self.exclude_external_links),
            ("exclude_social_media_links", self.exclude_social_media_links),
            ("process_iframes", self.process_iframes),
            ("remove_overlay_elements", self.remove_overlay_elements),
            ("magic", self.magic),
        ];
        for (key, value) in flags {
            if let Some(value) = value {
                params.insert(key.into(), json!(value));
            }
        }

        if let Some(delay) = self.delay_before_return_html {
            params.insert("delay_before_return_html".into(), json!(delay));
        }
        if let Some(ref strategy) = self.deep_crawl_strategy {
            params.insert("deep_crawl_strategy".into(), strategy.to_payload());
        }

        json!({"type": "CrawlerRunConfig", "params": params})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_settings_carries_stealth_defaults() {
        let settings = Settings {
            cache_mode: CacheMode::Enabled,
            word_count_threshold: 25,
            screenshot: true,
            ..Settings::default()
        };
        let config = CrawlerRunConfig::from_settings(&settings);
        assert!(config.stream);
        assert_eq!(config.cache_mode, CacheMode::Enabled);
        assert_eq!(config.word_count_threshold, 25);
        assert!(config.screenshot);
        assert_eq!(config.user_agent_mode.as_deref(), Some("random"));
        assert!(config.simulate_user);
        assert_eq!(config.timezone_id.as_deref(), Some("America/Los_Angeles"));
        assert_eq!(config.geolocation, Some(GeolocationConfig::los_angeles()));
        assert!(config.deep_crawl_strategy.is_none());
    }

    #[test]
    fn test_strategy_for_keywords() {
        let settings = Settings {
            include_external: true,
            ..Settings::default()
        };

        let keywords = vec!["rust".to_string(), "async".to_string()];
        let best_first = DeepCrawlStrategy::for_keywords(Some(&keywords), &settings);
        assert_eq!(
            best_first,
            DeepCrawlStrategy::BestFirst {
                max_depth: 2,
                max_pages: 50,
                include_external: false,
                scorer: KeywordRelevanceScorer {
                    keywords,
                    weight: 0.7,
                },
            }
        );

        let bfs = DeepCrawlStrategy::for_keywords(None, &settings);
        assert_eq!(
            bfs,
            DeepCrawlStrategy::BreadthFirst {
                max_depth: 2,
                max_pages: 50,
                include_external: true,
            }
        );

        let empty: Vec<String> = Vec::new();
        assert_eq!(DeepCrawlStrategy::for_keywords(Some(&empty), &settings).name(), "bfs");
    }

    #[test]
    fn test_run_config_payload() {
        let config = CrawlerRunConfig::from_settings(&Settings::default())
            .with_keep_attrs(&["id", "class"])
            .with_deep_crawl_strategy(DeepCrawlStrategy::BreadthFirst {
                max_depth: 1,
                max_pages: 5,
                include_external: false,
            });
        let payload = config.to_payload();

        assert_eq!(payload["type"], "CrawlerRunConfig");
        let params = &payload["params"];
        assert_eq!(params["stream"], true);
        assert_eq!(
            params["cache_mode"],
            json!({"type": "CacheMode", "params": "bypass"})
        );
        assert_eq!(params["word_count_threshold"], 10);
        assert_eq!(params["keep_attrs"], json!(["id", "class"]));
        assert_eq!(params["geolocation"]["type"], "GeolocationConfig");
        assert_eq!(params["geolocation"]["params"]["latitude"], 34.0522);
        assert_eq!(params["deep_crawl_strategy"]["type"], "BFSDeepCrawlStrategy");
        assert_eq!(params["deep_crawl_strategy"]["params"]["max_pages"], 5);
        assert!(params.get("magic").is_none());
        assert!(params.get("delay_before_return_html").is_none());
    }

    #[test]
    fn test_best_first_payload_nests_scorer() {
        let strategy = DeepCrawlStrategy::BestFirst {
            max_depth: 3,
            max_pages: 10,
            include_external: false,
            scorer: KeywordRelevanceScorer::new(vec!["docs".to_string()]),
        };
        let payload = strategy.to_payload();
        assert_eq!(payload["type"], "BestFirstCrawlingStrategy");
        assert_eq!(
            payload["params"]["url_scorer"],
            json!({
                "type": "KeywordRelevanceScorer",
                "params": {"keywords": ["docs"], "weight": 0.7}
            })
        );
    }

    #[test]
    fn test_streams_pages_requires_strategy() {
        let config = CrawlerRunConfig::from_settings(&Settings::default());
        assert!(!config.streams_pages());
        let config = config.with_deep_crawl_strategy(DeepCrawlStrategy::for_keywords(
            None,
            &Settings::default(),
        ));
        assert!(config.streams_pages());
    }

    #[test]
    fn test_browser_config_payload() {
        let browser = Settings::default().browser_config();
        assert_eq!(
            browser.to_payload(),
            json!({
                "type": "BrowserConfig",
                "params": {"browser_type": "chromium", "headless": true, "verbose": false}
            })
        );
    }
}
