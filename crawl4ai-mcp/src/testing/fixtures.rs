//! Test fixtures for tool testing.

use std::sync::Arc;

use super::MockCrawler;
use crate::config::{ContentType, Settings};
use crate::core::{CrawlOutcome, RawOutcome};
use crate::tools::CrawlTools;

/// Settings with the given content type and defaults elsewhere.
#[must_use]
pub fn settings_with(content_type: ContentType) -> Settings {
    Settings {
        content_type,
        ..Settings::default()
    }
}

/// A successful page carrying fit markdown.
#[must_use]
pub fn markdown_page(url: &str, fit: &str) -> RawOutcome {
    CrawlOutcome::succeeded(url).with_fit_markdown(fit).into()
}

/// A failed page.
#[must_use]
pub fn failed_page(url: &str, error_message: &str) -> RawOutcome {
    CrawlOutcome::failed(url, Some(error_message)).into()
}

/// Tools wired to a [`MockCrawler`].
#[derive(Debug)]
pub struct TestTools {
    /// The scripted crawler.
    pub crawler: MockCrawler,
    /// Tools under test.
    pub tools: CrawlTools,
}

impl TestTools {
    /// Creates tools with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Creates tools with the given settings.
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        let crawler = MockCrawler::new();
        let tools = CrawlTools::new(Arc::new(settings), Arc::new(crawler.clone()));
        Self { crawler, tools }
    }
}

impl Default for TestTools {
    fn default() -> Self {
        Self::new()
    }
}
