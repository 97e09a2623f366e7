//! Per-call timing and correlation.

use std::time::Instant;
use tracing::{info, info_span, Span};
use uuid::Uuid;

/// Field name of the request id recorded on tool spans.
pub const REQUEST_ID_FIELD: &str = "request_id";

/// Times one tool call inside its own span.
#[derive(Debug)]
pub struct CallTimer {
    start: Instant,
    tool: &'static str,
    request_id: Uuid,
    span: Span,
}

impl CallTimer {
    /// Starts timing a call to `tool` under a fresh request id.
    #[must_use]
    pub fn start(tool: &'static str) -> Self {
        let request_id = Uuid::new_v4();
        let span = info_span!("tool_call", tool, request_id = %request_id);
        Self {
            start: Instant::now(),
            tool,
            request_id,
            span,
        }
    }

    /// The span to instrument the call with.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    /// The request id.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// The tool name.
    #[must_use]
    pub fn tool(&self) -> &'static str {
        self.tool
    }

    /// Elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Logs completion with the result counts and returns the duration.
    pub fn finish(self, results: usize, errors: usize) -> f64 {
        let duration_ms = self.elapsed_ms();
        self.span.in_scope(|| {
            info!(tool = self.tool, results, errors, duration_ms, "Tool call finished");
        });
        duration_ms
    }
}
