//! Normalized crawl result returned by every tool.

use super::ResultStatus;
use serde::{Deserialize, Serialize};

/// The outcome of a crawl, reduced to what a tool caller needs.
///
/// Construct through [`NormalizedResult::success`] or
/// [`NormalizedResult::error`] so that a success always carries a url and
/// content, and an error always carries a message and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// The status of the crawl operation.
    pub status: ResultStatus,

    /// The URL that was crawled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// The extracted content in html or markdown format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Error message, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl NormalizedResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Success,
            url: Some(url.into()),
            content: Some(content.into()),
            error_message: None,
        }
    }

    /// Creates an error result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            url: None,
            content: None,
            error_message: Some(message.into()),
        }
    }

    /// Returns true if the status is success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }

    /// Returns true if the status is error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == ResultStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_instantiation() {
        let result = NormalizedResult::success("http://example.com", "Hello world");
        assert!(result.is_success());
        assert_eq!(result.url.as_deref(), Some("http://example.com"));
        assert_eq!(result.content.as_deref(), Some("Hello world"));
        assert_eq!(result.error_message, None);
    }

    #[test]
    fn test_error_instantiation() {
        let result = NormalizedResult::error("Failed to crawl");
        assert!(result.is_error());
        assert_eq!(result.url, None);
        assert_eq!(result.content, None);
        assert_eq!(result.error_message.as_deref(), Some("Failed to crawl"));
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let json = serde_json::to_value(NormalizedResult::error("boom")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "error_message": "boom"})
        );

        let json = serde_json::to_value(NormalizedResult::success("http://x", "")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "success", "url": "http://x", "content": ""})
        );
    }
}
