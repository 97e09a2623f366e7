//! Tests for result normalization.

#[cfg(test)]
mod tests {
    use crate::config::ContentType;
    use crate::core::{
        normalize, CrawlOutcome, NormalizedResult, RawOutcome, ResultStatus,
        UNKNOWN_CRAWL_ERROR,
    };
    use pretty_assertions::assert_eq;

    fn markdown(outcome: CrawlOutcome) -> NormalizedResult {
        normalize(&RawOutcome::Single(outcome), ContentType::Markdown)
    }

    #[test]
    fn test_success_fit_markdown() {
        let result = markdown(
            CrawlOutcome::succeeded("http://test.com").with_fit_markdown("Fit markdown content"),
        );
        assert_eq!(
            result,
            NormalizedResult::success("http://test.com", "Fit markdown content")
        );
    }

    #[test]
    fn test_fit_markdown_preferred_over_raw() {
        let result = markdown(
            CrawlOutcome::succeeded("http://x")
                .with_fit_markdown("A")
                .with_raw_markdown("B"),
        );
        assert_eq!(result, NormalizedResult::success("http://x", "A"));
    }

    #[test]
    fn test_success_raw_markdown_when_fit_missing() {
        let result = markdown(
            CrawlOutcome::succeeded("http://test.com").with_raw_markdown("Raw markdown content"),
        );
        assert_eq!(
            result,
            NormalizedResult::success("http://test.com", "Raw markdown content")
        );
    }

    #[test]
    fn test_success_raw_markdown_when_fit_empty() {
        let result = markdown(
            CrawlOutcome::succeeded("http://test.com")
                .with_fit_markdown("")
                .with_raw_markdown("Raw markdown content"),
        );
        assert_eq!(result.content.as_deref(), Some("Raw markdown content"));
    }

    #[test]
    fn test_extracted_content_takes_precedence_over_markdown() {
        // A non-empty extracted_content is returned as the content rather
        // than being reported as a failure to extract.
        let result = markdown(
            CrawlOutcome::succeeded("http://test.com")
                .with_extracted_content("[{\"title\": \"Example\"}]")
                .with_fit_markdown("Fit markdown content"),
        );
        assert_eq!(
            result,
            NormalizedResult::success("http://test.com", "[{\"title\": \"Example\"}]")
        );
    }

    #[test]
    fn test_empty_extracted_content_falls_back_to_markdown() {
        let result = markdown(
            CrawlOutcome::succeeded("http://test.com")
                .with_extracted_content("")
                .with_fit_markdown("Fit"),
        );
        assert_eq!(result.content.as_deref(), Some("Fit"));
    }

    #[test]
    fn test_extracted_content_without_markdown_is_an_error() {
        let result = markdown(
            CrawlOutcome::succeeded("http://test.com").with_extracted_content("data"),
        );
        assert_eq!(result, NormalizedResult::error(UNKNOWN_CRAWL_ERROR));
    }

    #[test]
    fn test_success_html() {
        let outcome = CrawlOutcome::succeeded("http://test.com")
            .with_html("<html>Html content</html>")
            .with_fit_markdown("ignored");
        let result = normalize(&outcome.into(), ContentType::Html);
        assert_eq!(
            result,
            NormalizedResult::success("http://test.com", "<html>Html content</html>")
        );
    }

    #[test]
    fn test_html_mode_passes_empty_body_through() {
        let outcome = CrawlOutcome::succeeded("http://test.com")
            .with_html("")
            .with_fit_markdown("not used");
        let result = normalize(&outcome.into(), ContentType::Html);
        assert_eq!(result, NormalizedResult::success("http://test.com", ""));
    }

    #[test]
    fn test_html_mode_missing_body_is_empty_content() {
        let result = normalize(
            &CrawlOutcome::succeeded("http://test.com").into(),
            ContentType::Html,
        );
        assert_eq!(result, NormalizedResult::success("http://test.com", ""));
    }

    #[test]
    fn test_failed_html_mode_still_reports_error() {
        let outcome = CrawlOutcome::failed("http://test.com", Some("403 Forbidden"))
            .with_html("<html>blocked</html>");
        let result = normalize(&outcome.into(), ContentType::Html);
        assert_eq!(result, NormalizedResult::error("403 Forbidden"));
    }

    #[test]
    fn test_failed_crawlresult_with_message() {
        let result = markdown(CrawlOutcome::failed("http://test.com", Some("Page not found")));
        assert_eq!(result.status, ResultStatus::Error);
        assert_eq!(result.url, None);
        assert_eq!(result.content, None);
        assert_eq!(result.error_message.as_deref(), Some("Page not found"));
    }

    #[test]
    fn test_failed_crawlresult_no_message() {
        let result = markdown(CrawlOutcome::failed("http://test.com", None));
        assert_eq!(result, NormalizedResult::error(UNKNOWN_CRAWL_ERROR));
    }

    #[test]
    fn test_failed_crawlresult_empty_message() {
        let result = markdown(CrawlOutcome::failed("http://x", Some("")));
        assert_eq!(
            result,
            NormalizedResult::error("Unknown crawl error.")
        );
    }

    #[test]
    fn test_success_without_markdown_is_error() {
        let result = markdown(CrawlOutcome::succeeded("http://test.com"));
        assert_eq!(result, NormalizedResult::error(UNKNOWN_CRAWL_ERROR));

        let mut outcome = CrawlOutcome::succeeded("http://test.com")
            .with_fit_markdown("")
            .with_raw_markdown("");
        outcome.error_message = Some("word count below threshold".to_string());
        assert_eq!(
            markdown(outcome),
            NormalizedResult::error("word count below threshold")
        );
    }

    #[test]
    fn test_container_with_one_outcome_matches_direct() {
        let outcome =
            CrawlOutcome::succeeded("http://container.com").with_fit_markdown("Content from container");
        let direct = normalize(&outcome.clone().into(), ContentType::Markdown);
        let wrapped = normalize(&RawOutcome::Container(vec![outcome]), ContentType::Markdown);
        assert_eq!(wrapped, direct);
        assert_eq!(
            wrapped,
            NormalizedResult::success("http://container.com", "Content from container")
        );
    }

    #[test]
    fn test_container_with_several_outcomes_keeps_only_the_first() {
        let container = RawOutcome::Container(vec![
            CrawlOutcome::succeeded("http://first.com").with_fit_markdown("first"),
            CrawlOutcome::succeeded("http://second.com").with_fit_markdown("second"),
        ]);
        let result = normalize(&container, ContentType::Markdown);
        assert_eq!(result, NormalizedResult::success("http://first.com", "first"));
    }

    #[test]
    fn test_empty_container_is_error() {
        let result = normalize(&RawOutcome::Container(Vec::new()), ContentType::Markdown);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Unexpected result type from crawler: empty crawl result container")
        );
    }

    #[test]
    fn test_unexpected_result_type() {
        let raw = RawOutcome::decode(serde_json::json!("unexpected string"));
        let result = normalize(&raw, ContentType::Markdown);
        assert_eq!(result.status, ResultStatus::Error);
        assert_eq!(result.url, None);
        assert_eq!(result.content, None);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Unexpected result type from crawler: string")
        );
    }

    #[test]
    fn test_unexpected_result_type_is_error_in_html_mode() {
        let result = normalize(&RawOutcome::unrecognized("number"), ContentType::Html);
        assert!(result.error_message.unwrap().contains("number"));
    }
}
