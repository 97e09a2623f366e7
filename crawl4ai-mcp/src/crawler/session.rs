//! Guaranteed release of crawler sessions.

use std::sync::Arc;
use tracing::{debug, warn};

use super::{BrowserConfig, CrawlerLauncher, CrawlerSession};
use crate::errors::Result;

/// Owns an open crawler session until it is released.
///
/// Call [`SessionGuard::release`] on every exit path. If the guard is dropped
/// without being released (a panic or a cancelled future), the session is
/// closed from a background task on the current tokio runtime instead.
pub struct SessionGuard {
    session: Arc<dyn CrawlerSession>,
    released: bool,
}

impl SessionGuard {
    /// Opens a session through the launcher.
    pub async fn acquire(launcher: &dyn CrawlerLauncher, browser: &BrowserConfig) -> Result<Self> {
        let session = launcher.open(browser).await?;
        debug!(browser = %browser.browser_type, "Crawler session opened");
        Ok(Self::new(session))
    }

    /// Wraps an already open session.
    #[must_use]
    pub fn new(session: Arc<dyn CrawlerSession>) -> Self {
        Self {
            session,
            released: false,
        }
    }

    /// The guarded session.
    #[must_use]
    pub fn session(&self) -> &dyn CrawlerSession {
        self.session.as_ref()
    }

    /// Closes the session.
    pub async fn release(mut self) -> Result<()> {
        self.released = true;
        let result = self.session.close().await;
        debug!(ok = result.is_ok(), "Crawler session released");
        result
    }

    /// Closes the session, logging instead of returning a close failure.
    pub async fn release_logged(self) {
        if let Err(err) = self.release().await {
            warn!(error = %err, "Failed to close crawler session");
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        warn!("Crawler session dropped without release; closing in background");
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let session = Arc::clone(&self.session);
                handle.spawn(async move {
                    if let Err(err) = session.close().await {
                        warn!(error = %err, "Background close of crawler session failed");
                    }
                });
            }
            Err(_) => warn!("No tokio runtime available; crawler session leaked"),
        }
    }
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}
