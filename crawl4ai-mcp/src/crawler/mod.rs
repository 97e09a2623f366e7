//! The crawler collaborator boundary.
//!
//! Browser automation, deep-crawl traversal and markdown generation happen in
//! an external crawler. These traits describe the part of it the tools use,
//! so the tools can be driven by the crawl4ai server client or by a test
//! double.

mod client;
mod ndjson;
mod run_config;
mod session;

use async_trait::async_trait;
use futures::stream::BoxStream;
use std::fmt;
use std::sync::Arc;

use crate::core::RawOutcome;
use crate::errors::Result;

pub use client::{Crawl4aiClient, Crawl4aiSession};
pub use ndjson::outcome_stream;
pub use run_config::{
    BrowserConfig, CrawlerRunConfig, DeepCrawlStrategy, GeolocationConfig,
    KeywordRelevanceScorer,
};
pub use session::SessionGuard;

/// Asynchronous sequence of page outcomes.
pub type OutcomeStream = BoxStream<'static, Result<RawOutcome>>;

/// What a fetch call hands back: one outcome, or a stream of them.
pub enum CrawlResponse {
    /// A single decoded response.
    Outcome(RawOutcome),
    /// Outcomes delivered as they are produced.
    Stream(OutcomeStream),
}

impl CrawlResponse {
    /// Name of the response kind, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> String {
        match self {
            Self::Outcome(raw) => raw.kind(),
            Self::Stream(_) => "crawl result stream".to_string(),
        }
    }
}

impl fmt::Debug for CrawlResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outcome(raw) => f.debug_tuple("Outcome").field(raw).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// An open crawler session.
#[async_trait]
pub trait CrawlerSession: Send + Sync {
    /// Crawls one URL. With a deep-crawl strategy this may stream many pages.
    async fn arun(&self, url: &str, config: &CrawlerRunConfig) -> Result<CrawlResponse>;

    /// Crawls several URLs.
    async fn arun_many(&self, urls: &[String], config: &CrawlerRunConfig)
        -> Result<CrawlResponse>;

    /// Releases the session.
    async fn close(&self) -> Result<()>;
}

/// Opens crawler sessions.
#[async_trait]
pub trait CrawlerLauncher: Send + Sync {
    /// Starts a session with the given browser parameters.
    async fn open(&self, browser: &BrowserConfig) -> Result<Arc<dyn CrawlerSession>>;
}
