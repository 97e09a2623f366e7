//! Decoding of the crawler's newline-delimited JSON result stream.
//!
//! Each line is one page outcome. The server ends the stream with a
//! `{"status": "completed"}` line and reports failures with
//! `{"status": "error", ...}`.

use futures::{Stream, StreamExt};
use serde_json::Value;
use std::pin::Pin;

use super::OutcomeStream;
use crate::core::RawOutcome;
use crate::errors::CrawlError;

type ByteStream<B> = Pin<Box<dyn Stream<Item = std::result::Result<B, reqwest::Error>> + Send>>;

enum LineEvent {
    Skip,
    Done,
    Outcome(RawOutcome),
    Failed(CrawlError),
}

struct NdjsonState<B> {
    bytes: ByteStream<B>,
    buffer: Vec<u8>,
    finished: bool,
}

impl<B> NdjsonState<B> {
    fn next_line(&mut self) -> Option<Vec<u8>> {
        let newline = self.buffer.iter().position(|b| *b == b'\n')?;
        let mut line: Vec<u8> = self.buffer.drain(..=newline).collect();
        line.pop();
        Some(line)
    }
}

/// Turns a response body of NDJSON lines into an outcome stream.
///
/// The stream ends after the completion marker, after the body ends, or
/// after the first error it yields.
pub fn outcome_stream<S, B>(bytes: S) -> OutcomeStream
where
    S: Stream<Item = std::result::Result<B, reqwest::Error>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let state = NdjsonState {
        bytes: Box::pin(bytes),
        buffer: Vec::new(),
        finished: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        loop {
            if state.finished {
                return None;
            }
            if let Some(line) = state.next_line() {
                match decode_line(&line) {
                    LineEvent::Skip => continue,
                    LineEvent::Done => {
                        state.finished = true;
                        return None;
                    }
                    LineEvent::Outcome(raw) => return Some((Ok(raw), state)),
                    LineEvent::Failed(err) => {
                        state.finished = true;
                        return Some((Err(err), state));
                    }
                }
            }
            match state.bytes.next().await {
                Some(Ok(chunk)) => state.buffer.extend_from_slice(chunk.as_ref()),
                Some(Err(err)) => {
                    state.finished = true;
                    return Some((Err(CrawlError::from(err)), state));
                }
                None => {
                    state.finished = true;
                    let rest = std::mem::take(&mut state.buffer);
                    return match decode_line(&rest) {
                        LineEvent::Outcome(raw) => Some((Ok(raw), state)),
                        LineEvent::Failed(err) => Some((Err(err), state)),
                        LineEvent::Skip | LineEvent::Done => None,
                    };
                }
            }
        }
    })
    .boxed()
}

fn decode_line(line: &[u8]) -> LineEvent {
    let text = String::from_utf8_lossy(line);
    let text = text.trim();
    if text.is_empty() {
        return LineEvent::Skip;
    }

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => return LineEvent::Failed(CrawlError::Decode(format!("invalid stream line: {err}"))),
    };

    match value.get("status").and_then(Value::as_str) {
        Some("completed") => LineEvent::Done,
        Some("error") => LineEvent::Failed(CrawlError::stream(stream_error_message(&value))),
        _ => LineEvent::Outcome(RawOutcome::decode(value)),
    }
}

fn stream_error_message(value: &Value) -> String {
    ["error", "message", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .unwrap_or("crawler reported an error without details")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CrawlOutcome;
    use crate::errors::Result;
    use pretty_assertions::assert_eq;

    async fn collect(stream: OutcomeStream) -> Vec<Result<RawOutcome>> {
        stream.collect().await
    }

    fn body(chunks: &[&str]) -> OutcomeStream {
        let chunks: Vec<std::result::Result<Vec<u8>, reqwest::Error>> =
            chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect();
        outcome_stream(futures::stream::iter(chunks))
    }

    #[tokio::test]
    async fn test_lines_split_across_chunks() {
        let stream = body(&[
            "{\"url\": \"http://a\", \"suc",
            "cess\": true}\n{\"url\": \"http://b\", \"success\": false}\n",
            "{\"status\": \"completed\"}\n",
        ]);
        let items = collect(stream).await;
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].as_ref().unwrap(),
            &RawOutcome::Single(CrawlOutcome::succeeded("http://a"))
        );
        assert_eq!(
            items[1].as_ref().unwrap(),
            &RawOutcome::Single(CrawlOutcome::failed("http://b", None))
        );
    }

    #[tokio::test]
    async fn test_completion_marker_ends_stream() {
        let stream = body(&[
            "{\"status\": \"completed\"}\n",
            "{\"url\": \"http://late\", \"success\": true}\n",
        ]);
        assert!(collect(stream).await.is_empty());
    }

    #[tokio::test]
    async fn test_trailing_line_without_newline() {
        let stream = body(&["\n\r\n{\"url\": \"http://a\", \"success\": true}"]);
        let items = collect(stream).await;
        assert_eq!(items.len(), 1);
        assert!(items[0].is_ok());
    }

    #[tokio::test]
    async fn test_error_line_stops_stream() {
        let stream = body(&[
            "{\"url\": \"http://a\", \"success\": true}\n",
            "{\"status\": \"error\", \"error\": \"browser crashed\"}\n",
            "{\"url\": \"http://b\", \"success\": true}\n",
        ]);
        let items = collect(stream).await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        let err = items[1].as_ref().unwrap_err();
        assert_eq!(err.to_string(), "Crawl stream failed: browser crashed");
    }

    #[tokio::test]
    async fn test_invalid_json_line_is_decode_error() {
        let items = collect(body(&["not json\n"])).await;
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(CrawlError::Decode(_))));
    }
}
