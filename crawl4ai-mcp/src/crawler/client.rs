//! Crawler sessions backed by a crawl4ai server's HTTP API.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::{
    outcome_stream, BrowserConfig, CrawlResponse, CrawlerLauncher, CrawlerRunConfig,
    CrawlerSession,
};
use crate::config::Settings;
use crate::core::RawOutcome;
use crate::errors::{CrawlError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ERROR_BODY: usize = 500;

/// Client for a crawl4ai server; opens [`Crawl4aiSession`]s.
#[derive(Debug, Clone)]
pub struct Crawl4aiClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl Crawl4aiClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// `timeout` bounds each non-streaming request; streamed crawls run as
    /// long as the server keeps sending results.
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("crawl4ai-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
            timeout,
        })
    }

    /// Creates a client from loaded settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.base_url.clone(),
            settings.api_token.clone(),
            settings.request_timeout(),
        )
    }

    /// The server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.api_token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Checks that the server is up.
    pub async fn health(&self) -> Result<()> {
        let request = self.http.get(self.endpoint("/health")).timeout(self.timeout);
        let response = self.authorize(request).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn post_crawl(&self, body: &Value) -> Result<RawOutcome> {
        let request = self
            .http
            .post(self.endpoint("/crawl"))
            .timeout(self.timeout)
            .json(body);
        let response = check_status(self.authorize(request).send().await?).await?;
        let value: Value = response.json().await?;
        Ok(RawOutcome::decode(value))
    }

    async fn post_crawl_stream(&self, body: &Value) -> Result<CrawlResponse> {
        let request = self.http.post(self.endpoint("/crawl/stream")).json(body);
        let response = check_status(self.authorize(request).send().await?).await?;
        Ok(CrawlResponse::Stream(outcome_stream(response.bytes_stream())))
    }
}

#[async_trait]
impl CrawlerLauncher for Crawl4aiClient {
    async fn open(&self, browser: &BrowserConfig) -> Result<Arc<dyn CrawlerSession>> {
        self.health().await.map_err(|err| {
            CrawlError::session(format!(
                "crawl4ai server at {} is not available: {err}",
                self.base_url
            ))
        })?;
        Ok(Arc::new(Crawl4aiSession {
            client: self.clone(),
            browser: browser.clone(),
        }))
    }
}

/// One crawl session against a crawl4ai server.
///
/// The server owns its browser pool, so a session only pins the browser
/// parameters sent with each request.
#[derive(Debug, Clone)]
pub struct Crawl4aiSession {
    client: Crawl4aiClient,
    browser: BrowserConfig,
}

impl Crawl4aiSession {
    fn request_body(&self, urls: &[String], config: &CrawlerRunConfig) -> Value {
        json!({
            "urls": urls,
            "browser_config": self.browser.to_payload(),
            "crawler_config": config.to_payload(),
        })
    }

    async fn crawl_once(&self, urls: &[String], config: &CrawlerRunConfig) -> Result<CrawlResponse> {
        let mut config = config.clone();
        config.stream = false;
        let raw = self.client.post_crawl(&self.request_body(urls, &config)).await?;
        Ok(CrawlResponse::Outcome(raw))
    }
}

#[async_trait]
impl CrawlerSession for Crawl4aiSession {
    async fn arun(&self, url: &str, config: &CrawlerRunConfig) -> Result<CrawlResponse> {
        let urls = [url.to_string()];
        debug!(url, streaming = config.streams_pages(), "Submitting crawl");
        if config.streams_pages() {
            self.client
                .post_crawl_stream(&self.request_body(&urls, config))
                .await
        } else {
            self.crawl_once(&urls, config).await
        }
    }

    async fn arun_many(
        &self,
        urls: &[String],
        config: &CrawlerRunConfig,
    ) -> Result<CrawlResponse> {
        debug!(count = urls.len(), streaming = config.stream, "Submitting batch crawl");
        if config.stream {
            self.client
                .post_crawl_stream(&self.request_body(urls, config))
                .await
        } else {
            self.crawl_once(urls, config).await
        }
    }

    async fn close(&self) -> Result<()> {
        debug!(base_url = %self.client.base_url, "Closing crawl4ai session");
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(CrawlError::Server {
        status: status.as_u16(),
        message: error_detail(&body, status.canonical_reason().unwrap_or("request failed")),
    })
}

fn error_detail(body: &str, fallback: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(detail) = value.get("detail").and_then(Value::as_str) {
            return detail.to_string();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        fallback.to_string()
    } else {
        body.chars().take(MAX_ERROR_BODY).collect()
    }
}
