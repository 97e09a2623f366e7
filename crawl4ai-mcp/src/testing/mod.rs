//! Testing utilities for the crawl tools.
//!
//! This module provides:
//! - A scripted crawler standing in for the crawl4ai server
//! - Fixtures for settings and page outcomes

mod fixtures;
mod mocks;

pub use fixtures::{failed_page, markdown_page, settings_with, TestTools};
pub use mocks::{MockCrawler, RecordedCall, ScriptedResponse};
