//! Enumerated setting values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser engine the crawler launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserType {
    /// Chromium (default).
    Chromium,
    /// Firefox.
    Firefox,
    /// WebKit.
    Webkit,
}

impl Default for BrowserType {
    fn default() -> Self {
        Self::Chromium
    }
}

impl fmt::Display for BrowserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chromium => write!(f, "chromium"),
            Self::Firefox => write!(f, "firefox"),
            Self::Webkit => write!(f, "webkit"),
        }
    }
}

/// Cache behaviour requested from the crawler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Read from and write to the cache.
    Enabled,
    /// No caching at all.
    Disabled,
    /// Only read from the cache.
    ReadOnly,
    /// Only write to the cache.
    WriteOnly,
    /// Skip the cache for this run; fetch fresh content.
    Bypass,
}

impl Default for CacheMode {
    fn default() -> Self {
        Self::Bypass
    }
}

impl CacheMode {
    /// The value the crawler expects on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::ReadOnly => "read_only",
            Self::WriteOnly => "write_only",
            Self::Bypass => "bypass",
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which representation of a crawled page the tools return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// The raw HTML, handed to the caller untouched.
    Html,
    /// Fit markdown, falling back to raw markdown.
    Markdown,
}

impl Default for ContentType {
    fn default() -> Self {
        Self::Markdown
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}
