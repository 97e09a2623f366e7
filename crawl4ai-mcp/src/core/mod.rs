//! Core domain model types.
//!
//! This module contains:
//! - The normalized result handed back to tool callers
//! - The crawler's per-page outcome and its decoded variants
//! - The normalizer mapping one onto the other

mod normalize;
#[cfg(test)]
mod normalize_tests;
mod outcome;
mod result;
mod status;

pub use normalize::{normalize, normalize_outcome, unexpected_result_type, UNKNOWN_CRAWL_ERROR};
pub use outcome::{CrawlOutcome, MarkdownContent, RawOutcome};
pub use result::NormalizedResult;
pub use status::ResultStatus;
