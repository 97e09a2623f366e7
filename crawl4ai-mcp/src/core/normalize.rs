//! Mapping crawler outcomes onto [`NormalizedResult`].

use super::{CrawlOutcome, NormalizedResult, RawOutcome};
use crate::config::ContentType;
use tracing::warn;

/// Message used when a failed outcome carries no error text.
pub const UNKNOWN_CRAWL_ERROR: &str = "Unknown crawl error.";

/// Normalizes a decoded crawler response.
///
/// This never fails: unrecognized input becomes an error result naming what
/// was received. A container is reduced to its first outcome; any further
/// outcomes are dropped with a warning.
#[must_use]
pub fn normalize(raw: &RawOutcome, content_type: ContentType) -> NormalizedResult {
    let outcome = match raw {
        RawOutcome::Single(outcome) => outcome,
        RawOutcome::Container(outcomes) => match outcomes.split_first() {
            Some((first, rest)) => {
                if !rest.is_empty() {
                    warn!(
                        url = %first.url,
                        discarded = rest.len(),
                        "Container held several crawl results; only the first is returned"
                    );
                }
                first
            }
            None => return unexpected_result_type("empty crawl result container"),
        },
        RawOutcome::Unrecognized { kind } => return unexpected_result_type(kind),
    };
    normalize_outcome(outcome, content_type)
}

/// Normalizes a single page outcome.
#[must_use]
pub fn normalize_outcome(outcome: &CrawlOutcome, content_type: ContentType) -> NormalizedResult {
    if outcome.success && content_type == ContentType::Html {
        // HTML is passed through as-is; a missing body is an empty one.
        return NormalizedResult::success(
            outcome.url.clone(),
            outcome.html.clone().unwrap_or_default(),
        );
    }

    if outcome.success {
        if let Some(markdown) = outcome.usable_markdown() {
            let content = outcome
                .extracted_content
                .as_deref()
                .filter(|s| !s.is_empty())
                .or_else(|| markdown.preferred())
                .filter(|s| !s.is_empty());
            if let Some(content) = content {
                return NormalizedResult::success(outcome.url.clone(), content);
            }
        }
    }

    let message = outcome
        .error_message
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_CRAWL_ERROR);
    NormalizedResult::error(message)
}

/// Error result for a crawler response of the wrong kind.
#[must_use]
pub fn unexpected_result_type(kind: &str) -> NormalizedResult {
    NormalizedResult::error(format!("Unexpected result type from crawler: {kind}"))
}
