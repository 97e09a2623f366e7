//! The `deep_crawl` tool.

use tracing::{info, warn, Instrument};

use super::{drain_stream, error_count, expected_stream, CrawlTools};
use crate::config::Settings;
use crate::core::NormalizedResult;
use crate::crawler::{CrawlResponse, CrawlerRunConfig, DeepCrawlStrategy, SessionGuard};
use crate::errors::Result;
use crate::observability::CallTimer;

/// Run configuration for a traversal from one start URL.
///
/// Non-empty keywords select best-first ordering; otherwise breadth-first.
#[must_use]
pub fn deep_crawl_run_config(settings: &Settings, keywords: Option<&[String]>) -> CrawlerRunConfig {
    CrawlerRunConfig::from_settings(settings)
        .with_deep_crawl_strategy(DeepCrawlStrategy::for_keywords(keywords, settings))
}

impl CrawlTools {
    /// Crawls outward from `url`, one result per visited page.
    ///
    /// The session is released exactly once whatever happens during the
    /// traversal.
    pub async fn deep_crawl(&self, url: &str, keywords: Option<&[String]>) -> Vec<NormalizedResult> {
        let timer = CallTimer::start("deep_crawl");
        let mut results = Vec::new();
        let outcome = self
            .run_deep_crawl(url, keywords, &mut results)
            .instrument(timer.span())
            .await;
        if let Err(err) = outcome {
            warn!(error = %err, remote = err.is_remote(), kept = results.len(), "Deep crawl failed");
            results.push(NormalizedResult::error(format!(
                "An error occurred during deep crawl: {err}"
            )));
        }
        timer.finish(results.len(), error_count(&results));
        results
    }

    async fn run_deep_crawl(
        &self,
        url: &str,
        keywords: Option<&[String]>,
        results: &mut Vec<NormalizedResult>,
    ) -> Result<()> {
        let config = deep_crawl_run_config(&self.settings, keywords);
        if let Some(ref strategy) = config.deep_crawl_strategy {
            info!(url, strategy = strategy.name(), "Starting deep crawl");
        }

        let guard = SessionGuard::acquire(self.launcher.as_ref(), &self.settings.browser_config()).await?;
        let outcome: Result<()> = async {
            match guard.session().arun(url, &config).await? {
                CrawlResponse::Stream(pages) => drain_stream(pages, self.content_type(), results).await,
                other => {
                    results.push(expected_stream(&other));
                    Ok(())
                }
            }
        }
        .await;

        // Runs on success and failure alike.
        guard.release_logged().await;
        outcome
    }
}
