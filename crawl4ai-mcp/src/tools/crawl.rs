//! The `crawl` tool.

use tracing::{info, warn, Instrument};

use super::{drain_stream, error_count, expected_stream, CrawlTools};
use crate::config::Settings;
use crate::core::NormalizedResult;
use crate::crawler::{CrawlResponse, CrawlerRunConfig, SessionGuard};
use crate::errors::Result;
use crate::observability::CallTimer;

/// Run configuration for a multi-URL crawl.
#[must_use]
pub fn crawl_run_config(settings: &Settings) -> CrawlerRunConfig {
    let mut config = CrawlerRunConfig::from_settings(settings);
    config.exclude_external_links = Some(false);
    config.exclude_social_media_links = Some(true);
    config.process_iframes = Some(true);
    config.remove_overlay_elements = Some(true);
    config.magic = Some(true);
    config
}

impl CrawlTools {
    /// Crawls every URL, one result per page in arrival order.
    ///
    /// If the crawl fails midway, the pages already received are kept and a
    /// single error entry is appended.
    pub async fn crawl(&self, urls: &[String]) -> Vec<NormalizedResult> {
        let timer = CallTimer::start("crawl");
        let mut results = Vec::new();
        if urls.is_empty() {
            timer.finish(0, 0);
            return results;
        }

        let outcome = self.run_crawl(urls, &mut results).instrument(timer.span()).await;
        if let Err(err) = outcome {
            warn!(error = %err, remote = err.is_remote(), kept = results.len(), "Crawl failed");
            results.push(NormalizedResult::error(format!(
                "An unexpected error occurred during crawl: {err}"
            )));
        }
        timer.finish(results.len(), error_count(&results));
        results
    }

    async fn run_crawl(&self, urls: &[String], results: &mut Vec<NormalizedResult>) -> Result<()> {
        info!(urls = urls.len(), "Starting crawl");
        let config = crawl_run_config(&self.settings);
        let guard = SessionGuard::acquire(self.launcher.as_ref(), &self.settings.browser_config()).await?;

        let outcome: Result<()> = async {
            match guard.session().arun_many(urls, &config).await? {
                CrawlResponse::Stream(stream) => drain_stream(stream, self.content_type(), results).await,
                other => {
                    results.push(expected_stream(&other));
                    Ok(())
                }
            }
        }
        .await;

        guard.release_logged().await;
        outcome
    }
}
