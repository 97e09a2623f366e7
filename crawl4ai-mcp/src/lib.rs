//! # crawl4ai-mcp
//!
//! MCP tools for web search and crawling, backed by a crawl4ai server.
//!
//! The crate exposes three tools:
//!
//! - **`google_search`**: fetch the first page of Google results for a query
//! - **`deep_crawl`**: traverse a site from one URL, breadth-first or keyword-ranked
//! - **`crawl`**: fetch a list of URLs
//!
//! Every crawler response is reduced to a [`core::NormalizedResult`]. Tools never
//! fail; errors come back as results with `status = "error"`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crawl4ai_mcp::prelude::*;
//! use std::sync::Arc;
//!
//! let settings = Arc::new(Settings::load()?);
//! let client = Crawl4aiClient::from_settings(&settings)?;
//! let tools = CrawlTools::new(settings, Arc::new(client));
//!
//! let results = tools.crawl(&["https://example.com".to_string()]).await;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod crawler;
pub mod errors;
pub mod observability;
pub mod server;
pub mod testing;
pub mod tools;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{BrowserType, CacheMode, ContentType, Settings};
    pub use crate::core::{normalize, NormalizedResult, RawOutcome, ResultStatus};
    pub use crate::crawler::{
        Crawl4aiClient, CrawlResponse, CrawlerLauncher, CrawlerRunConfig, CrawlerSession,
        SessionGuard,
    };
    pub use crate::errors::{CrawlError, Result};
    pub use crate::observability::{init_logging, LogFormat};
    pub use crate::server::CrawlServer;
    pub use crate::tools::CrawlTools;
}
