//! Error types for crawl4ai-mcp.
//!
//! Errors never cross the tool boundary: every [`CrawlError`] raised while
//! talking to the crawler is turned into an error
//! [`NormalizedResult`](crate::core::NormalizedResult) by the tool entry points.

use thiserror::Error;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CrawlError>;

/// The main error type for crawl operations.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Settings could not be loaded or are invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP exchange with the crawler server failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The crawler server answered with a non-success status.
    #[error("Crawler server returned {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Body or reason reported by the server.
        message: String,
    },

    /// The crawler reported a failure in the middle of a result stream.
    #[error("Crawl stream failed: {0}")]
    Stream(String),

    /// A crawler response could not be decoded.
    #[error("Failed to decode crawler response: {0}")]
    Decode(String),

    /// A crawler session could not be opened or closed.
    #[error("Crawler session error: {0}")]
    Session(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CrawlError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a session error.
    #[must_use]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Creates a stream error.
    #[must_use]
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream(message.into())
    }

    /// Whether the error came from the remote crawler rather than local setup.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Server { .. } | Self::Stream(_))
    }
}

impl From<figment::Error> for CrawlError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}
