//! The three crawl tools.
//!
//! Each call opens its own crawler session, runs one fetch, normalizes what
//! comes back and releases the session. Failures never escape a tool: they
//! are returned as error entries in the result.

mod crawl;
mod deep_crawl;
mod search;

use futures::StreamExt;
use std::sync::Arc;
use tracing::debug;

use crate::config::{ContentType, Settings};
use crate::core::{normalize, NormalizedResult};
use crate::crawler::{CrawlResponse, CrawlerLauncher, OutcomeStream};
use crate::errors::Result;

pub use crawl::crawl_run_config;
pub use deep_crawl::deep_crawl_run_config;
pub use search::{search_run_config, search_url, GOOGLE_SEARCH_URL};

/// Entry points shared by every transport.
#[derive(Clone)]
pub struct CrawlTools {
    settings: Arc<Settings>,
    launcher: Arc<dyn CrawlerLauncher>,
}

impl CrawlTools {
    /// Creates the tools over a crawler launcher.
    #[must_use]
    pub fn new(settings: Arc<Settings>, launcher: Arc<dyn CrawlerLauncher>) -> Self {
        Self { settings, launcher }
    }

    /// The settings the tools run with.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn content_type(&self) -> ContentType {
        self.settings.content_type
    }
}

impl std::fmt::Debug for CrawlTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlTools")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Error entry for a fetch that did not answer with a stream.
pub(crate) fn expected_stream(response: &CrawlResponse) -> NormalizedResult {
    NormalizedResult::error(format!(
        "Expected a result stream from the crawler, got: {}",
        response.kind()
    ))
}

/// Normalizes every streamed outcome into `results`.
///
/// Entries gathered before a stream error stay in `results`.
pub(crate) async fn drain_stream(
    mut stream: OutcomeStream,
    content_type: ContentType,
    results: &mut Vec<NormalizedResult>,
) -> Result<()> {
    while let Some(item) = stream.next().await {
        let result = normalize(&item?, content_type);
        debug!(status = %result.status, url = ?result.url, "Page normalized");
        results.push(result);
    }
    Ok(())
}

pub(crate) fn error_count(results: &[NormalizedResult]) -> usize {
    results.iter().filter(|r| r.is_error()).count()
}
