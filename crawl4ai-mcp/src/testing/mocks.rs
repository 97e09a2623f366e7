//! A scripted crawler for testing.

use async_trait::async_trait;
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::RawOutcome;
use crate::crawler::{
    BrowserConfig, CrawlResponse, CrawlerLauncher, CrawlerRunConfig, CrawlerSession,
};
use crate::errors::{CrawlError, Result};

/// What the mock answers to the next fetch call.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Return a single decoded response.
    Outcome(RawOutcome),
    /// Return a stream; `Err` items fail the stream at that point.
    Stream(Vec<std::result::Result<RawOutcome, String>>),
    /// Fail the call itself.
    Fail(String),
}

impl ScriptedResponse {
    fn into_response(self) -> Result<CrawlResponse> {
        match self {
            Self::Outcome(raw) => Ok(CrawlResponse::Outcome(raw)),
            Self::Stream(items) => {
                let items = items
                    .into_iter()
                    .map(|item| item.map_err(CrawlError::stream));
                Ok(CrawlResponse::Stream(futures::stream::iter(items).boxed()))
            }
            Self::Fail(message) => Err(CrawlError::session(message)),
        }
    }
}

/// One recorded fetch call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// URLs passed to the call.
    pub urls: Vec<String>,
    /// Run configuration passed to the call.
    pub config: CrawlerRunConfig,
}

#[derive(Default)]
struct MockState {
    arun_response: Mutex<Option<ScriptedResponse>>,
    arun_many_response: Mutex<Option<ScriptedResponse>>,
    open_error: Mutex<Option<String>>,
    close_error: Mutex<Option<String>>,
    open_count: Mutex<usize>,
    close_count: Mutex<usize>,
    arun_calls: Mutex<Vec<RecordedCall>>,
    arun_many_calls: Mutex<Vec<RecordedCall>>,
    browsers: Mutex<Vec<BrowserConfig>>,
}

/// A crawler that records calls and replays scripted responses.
///
/// Clones share state, so a test can keep one handle while the tools own
/// another.
#[derive(Clone, Default)]
pub struct MockCrawler {
    state: Arc<MockState>,
}

impl MockCrawler {
    /// Creates a mock with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the response to the next `arun` call.
    pub fn on_arun(&self, response: ScriptedResponse) {
        *self.state.arun_response.lock() = Some(response);
    }

    /// Sets the response to the next `arun_many` call.
    pub fn on_arun_many(&self, response: ScriptedResponse) {
        *self.state.arun_many_response.lock() = Some(response);
    }

    /// Makes opening a session fail.
    pub fn fail_open(&self, message: impl Into<String>) {
        *self.state.open_error.lock() = Some(message.into());
    }

    /// Makes closing a session fail.
    pub fn fail_close(&self, message: impl Into<String>) {
        *self.state.close_error.lock() = Some(message.into());
    }

    /// Number of sessions opened.
    #[must_use]
    pub fn open_count(&self) -> usize {
        *self.state.open_count.lock()
    }

    /// Number of session closes.
    #[must_use]
    pub fn close_count(&self) -> usize {
        *self.state.close_count.lock()
    }

    /// Recorded `arun` calls.
    #[must_use]
    pub fn arun_calls(&self) -> Vec<RecordedCall> {
        self.state.arun_calls.lock().clone()
    }

    /// Recorded `arun_many` calls.
    #[must_use]
    pub fn arun_many_calls(&self) -> Vec<RecordedCall> {
        self.state.arun_many_calls.lock().clone()
    }

    /// Browser configs sessions were opened with.
    #[must_use]
    pub fn browsers(&self) -> Vec<BrowserConfig> {
        self.state.browsers.lock().clone()
    }
}

impl std::fmt::Debug for MockCrawler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCrawler")
            .field("open_count", &self.open_count())
            .field("close_count", &self.close_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CrawlerLauncher for MockCrawler {
    async fn open(&self, browser: &BrowserConfig) -> Result<Arc<dyn CrawlerSession>> {
        if let Some(message) = self.state.open_error.lock().clone() {
            return Err(CrawlError::session(message));
        }
        *self.state.open_count.lock() += 1;
        self.state.browsers.lock().push(browser.clone());
        Ok(Arc::new(MockSession {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockSession {
    state: Arc<MockState>,
}

fn scripted(slot: &Mutex<Option<ScriptedResponse>>) -> Result<CrawlResponse> {
    slot.lock()
        .take()
        .unwrap_or_else(|| ScriptedResponse::Fail("no response scripted".to_string()))
        .into_response()
}

#[async_trait]
impl CrawlerSession for MockSession {
    async fn arun(&self, url: &str, config: &CrawlerRunConfig) -> Result<CrawlResponse> {
        self.state.arun_calls.lock().push(RecordedCall {
            urls: vec![url.to_string()],
            config: config.clone(),
        });
        scripted(&self.state.arun_response)
    }

    async fn arun_many(
        &self,
        urls: &[String],
        config: &CrawlerRunConfig,
    ) -> Result<CrawlResponse> {
        self.state.arun_many_calls.lock().push(RecordedCall {
            urls: urls.to_vec(),
            config: config.clone(),
        });
        scripted(&self.state.arun_many_response)
    }

    async fn close(&self) -> Result<()> {
        *self.state.close_count.lock() += 1;
        match self.state.close_error.lock().clone() {
            Some(message) => Err(CrawlError::session(message)),
            None => Ok(()),
        }
    }
}
