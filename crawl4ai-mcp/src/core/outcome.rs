//! Crawl outcomes as produced by the crawler, and their decoded shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Markdown renditions of a crawled page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownContent {
    /// Markdown converted from the whole page.
    pub raw_markdown: Option<String>,
    /// Content-filtered markdown, preferred when present.
    pub fit_markdown: Option<String>,
}

impl MarkdownContent {
    /// Creates markdown content from optional fit and raw variants.
    #[must_use]
    pub fn new(fit_markdown: Option<String>, raw_markdown: Option<String>) -> Self {
        Self {
            raw_markdown,
            fit_markdown,
        }
    }

    /// Whether neither variant carries any text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        non_empty(self.fit_markdown.as_deref()).is_none()
            && non_empty(self.raw_markdown.as_deref()).is_none()
    }

    /// Fit markdown if non-empty, else raw markdown.
    #[must_use]
    pub fn preferred(&self) -> Option<&str> {
        non_empty(self.fit_markdown.as_deref()).or(self.raw_markdown.as_deref())
    }
}

/// The crawler's record of fetching a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlOutcome {
    /// The crawled URL.
    #[serde(default)]
    pub url: String,
    /// Whether the crawler considers the fetch successful.
    pub success: bool,
    /// Raw HTML body.
    #[serde(default)]
    pub html: Option<String>,
    /// Markdown renditions.
    #[serde(default, deserialize_with = "markdown_field")]
    pub markdown: Option<MarkdownContent>,
    /// Content produced by an extraction strategy.
    #[serde(default)]
    pub extracted_content: Option<String>,
    /// Failure description reported by the crawler.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl CrawlOutcome {
    /// Creates a successful outcome with no content.
    #[must_use]
    pub fn succeeded(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: true,
            ..Default::default()
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failed(url: impl Into<String>, error_message: Option<&str>) -> Self {
        Self {
            url: url.into(),
            success: false,
            error_message: error_message.map(String::from),
            ..Default::default()
        }
    }

    /// Sets the raw HTML.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Sets the fit markdown, keeping any raw markdown.
    #[must_use]
    pub fn with_fit_markdown(mut self, fit: impl Into<String>) -> Self {
        self.markdown.get_or_insert_with(MarkdownContent::default).fit_markdown = Some(fit.into());
        self
    }

    /// Sets the raw markdown, keeping any fit markdown.
    #[must_use]
    pub fn with_raw_markdown(mut self, raw: impl Into<String>) -> Self {
        self.markdown.get_or_insert_with(MarkdownContent::default).raw_markdown = Some(raw.into());
        self
    }

    /// Sets the extracted content.
    #[must_use]
    pub fn with_extracted_content(mut self, content: impl Into<String>) -> Self {
        self.extracted_content = Some(content.into());
        self
    }

    /// Markdown only when at least one variant has text.
    #[must_use]
    pub fn usable_markdown(&self) -> Option<&MarkdownContent> {
        self.markdown.as_ref().filter(|md| !md.is_empty())
    }
}

/// A crawler response decoded at the collaborator boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOutcome {
    /// One page outcome.
    Single(CrawlOutcome),
    /// An ordered sequence of page outcomes.
    Container(Vec<CrawlOutcome>),
    /// Anything else; `kind` names what was received.
    Unrecognized {
        /// Human readable name of the received value's kind.
        kind: String,
    },
}

impl From<CrawlOutcome> for RawOutcome {
    fn from(outcome: CrawlOutcome) -> Self {
        Self::Single(outcome)
    }
}

impl RawOutcome {
    /// Creates an unrecognized outcome of the given kind.
    #[must_use]
    pub fn unrecognized(kind: impl Into<String>) -> Self {
        Self::Unrecognized { kind: kind.into() }
    }

    /// Decodes a JSON value returned by the crawler.
    ///
    /// Objects carrying a `results` array (the crawler's response envelope)
    /// and bare arrays decode as containers; objects carrying `success`
    /// decode as a single outcome.
    #[must_use]
    pub fn decode(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                if map.get("results").is_some_and(Value::is_array) {
                    if let Some(Value::Array(items)) = map.remove("results") {
                        return Self::decode_container(items);
                    }
                }
                if !map.contains_key("success") {
                    return Self::unrecognized("object");
                }
                match serde_json::from_value::<CrawlOutcome>(Value::Object(map)) {
                    Ok(outcome) => Self::Single(outcome),
                    Err(err) => Self::unrecognized(format!("malformed crawl result ({err})")),
                }
            }
            Value::Array(items) => Self::decode_container(items),
            other => Self::unrecognized(json_kind(&other)),
        }
    }

    fn decode_container(items: Vec<Value>) -> Self {
        let decoded: Result<Vec<CrawlOutcome>, _> =
            items.into_iter().map(serde_json::from_value).collect();
        match decoded {
            Ok(outcomes) => Self::Container(outcomes),
            Err(err) => Self::unrecognized(format!("container with malformed entries ({err})")),
        }
    }

    /// Name of this value's kind, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> String {
        match self {
            Self::Single(_) => "crawl result".to_string(),
            Self::Container(_) => "crawl result container".to_string(),
            Self::Unrecognized { kind } => kind.clone(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Accepts either a markdown object or a plain markdown string.
fn markdown_field<'de, D>(deserializer: D) -> Result<Option<MarkdownContent>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Structured(MarkdownContent),
    }

    Ok(Option::<Field>::deserialize(deserializer)?.map(|field| match field {
        Field::Text(raw) => MarkdownContent::new(None, Some(raw)),
        Field::Structured(markdown) => markdown,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_single_outcome() {
        let raw = RawOutcome::decode(json!({
            "url": "http://site.com",
            "success": true,
            "html": "<p>hi</p>",
            "markdown": {"raw_markdown": "hi", "fit_markdown": "hi!", "references_markdown": ""},
            "status_code": 200
        }));
        assert_eq!(
            raw,
            RawOutcome::Single(
                CrawlOutcome::succeeded("http://site.com")
                    .with_html("<p>hi</p>")
                    .with_raw_markdown("hi")
                    .with_fit_markdown("hi!")
            )
        );
    }

    #[test]
    fn test_decode_plain_string_markdown() {
        let raw = RawOutcome::decode(json!({"url": "u", "success": true, "markdown": "# Title"}));
        let RawOutcome::Single(outcome) = raw else {
            panic!("expected single outcome");
        };
        assert_eq!(outcome.markdown, Some(MarkdownContent::new(None, Some("# Title".into()))));
    }

    #[test]
    fn test_decode_response_envelope_as_container() {
        let raw = RawOutcome::decode(json!({
            "success": true,
            "results": [
                {"url": "http://a", "success": true},
                {"url": "http://b", "success": false, "error_message": "timeout"}
            ]
        }));
        let RawOutcome::Container(outcomes) = raw else {
            panic!("expected container");
        };
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[1].error_message.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_decode_unrecognized_kinds() {
        assert_eq!(RawOutcome::decode(json!("unexpected string")).kind(), "string");
        assert_eq!(RawOutcome::decode(json!(42)).kind(), "number");
        assert_eq!(RawOutcome::decode(Value::Null).kind(), "null");
        assert_eq!(RawOutcome::decode(json!({"status": "ok"})).kind(), "object");
        assert!(RawOutcome::decode(json!({"success": "yes"}))
            .kind()
            .starts_with("malformed crawl result"));
        assert!(RawOutcome::decode(json!([1, 2]))
            .kind()
            .starts_with("container with malformed entries"));
    }

    #[test]
    fn test_markdown_emptiness() {
        assert!(MarkdownContent::default().is_empty());
        assert!(MarkdownContent::new(Some(String::new()), Some(String::new())).is_empty());
        assert!(!MarkdownContent::new(None, Some("raw".into())).is_empty());
    }

    #[test]
    fn test_markdown_preferred_falls_back_to_raw() {
        let md = MarkdownContent::new(Some(String::new()), Some("raw".into()));
        assert_eq!(md.preferred(), Some("raw"));

        let md = MarkdownContent::new(Some("fit".into()), Some("raw".into()));
        assert_eq!(md.preferred(), Some("fit"));
    }
}
