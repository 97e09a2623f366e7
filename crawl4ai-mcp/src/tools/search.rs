//! The `google_search` tool.

use tracing::{warn, Instrument};

use super::CrawlTools;
use crate::config::Settings;
use crate::core::{normalize, unexpected_result_type, NormalizedResult};
use crate::crawler::{CrawlResponse, CrawlerRunConfig, SessionGuard};
use crate::errors::Result;
use crate::observability::CallTimer;

/// Search endpoint queried by [`CrawlTools::google_search`].
pub const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

/// First page of ten results for `query`.
#[must_use]
pub fn search_url(query: &str) -> String {
    format!(
        "{GOOGLE_SEARCH_URL}?q={}&start=0&num=10",
        urlencoding::encode(query)
    )
}

/// Run configuration for a results page.
#[must_use]
pub fn search_run_config(settings: &Settings) -> CrawlerRunConfig {
    let mut config = CrawlerRunConfig::from_settings(settings).with_keep_attrs(&["id", "class"]);
    config.keep_data_attributes = Some(true);
    config.delay_before_return_html = Some(2.0);
    config
}

impl CrawlTools {
    /// Fetches the search results page for `query` as one result.
    pub async fn google_search(&self, query: &str) -> NormalizedResult {
        let timer = CallTimer::start("google_search");
        let result = self
            .run_search(query)
            .instrument(timer.span())
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, remote = err.is_remote(), "Google search failed");
                NormalizedResult::error(format!("An error occurred during Google search: {err}"))
            });
        timer.finish(1, usize::from(result.is_error()));
        result
    }

    async fn run_search(&self, query: &str) -> Result<NormalizedResult> {
        let url = search_url(query);
        let config = search_run_config(&self.settings);
        let guard = SessionGuard::acquire(self.launcher.as_ref(), &self.settings.browser_config()).await?;
        let response = guard.session().arun(&url, &config).await;
        guard.release_logged().await;

        Ok(match response? {
            CrawlResponse::Outcome(raw) => normalize(&raw, self.content_type()),
            stream @ CrawlResponse::Stream(_) => unexpected_result_type(&stream.kind()),
        })
    }
}
