//! MCP server exposing the crawl tools.
//!
//! Tool results are returned as a single JSON text content item: one
//! normalized result for `google_search`, a list for the other two.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Serialize;

use crate::tools::CrawlTools;

/// Name the server reports to clients.
pub const SERVER_NAME: &str = "crawl4ai-mcp";

/// Arguments of `google_search`.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GoogleSearchArgs {
    /// The search query to perform.
    pub query: String,
}

/// Arguments of `deep_crawl`.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DeepCrawlArgs {
    /// The URL to start crawling from.
    pub url: String,
    /// Keywords to prioritize pages. Without them pages are visited breadth-first.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

/// Arguments of `crawl`.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CrawlArgs {
    /// The URLs to crawl.
    pub urls: Vec<String>,
}

/// The MCP handler.
#[derive(Clone)]
pub struct CrawlServer {
    tools: CrawlTools,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CrawlServer {
    /// Creates a server over the given tools.
    pub fn new(tools: CrawlTools) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Perform a Google search and return a markdown page of the top 10 results.")]
    async fn google_search(
        &self,
        Parameters(args): Parameters<GoogleSearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&self.tools.google_search(&args.query).await)
    }

    #[tool(description = "Crawl a website deeply, optionally using keywords to prioritize pages. Returns one result per visited page.")]
    async fn deep_crawl(
        &self,
        Parameters(args): Parameters<DeepCrawlArgs>,
    ) -> Result<CallToolResult, McpError> {
        let results = self
            .tools
            .deep_crawl(&args.url, args.keywords.as_deref())
            .await;
        json_result(&results)
    }

    #[tool(description = "Crawl multiple URLs and return their content, one result per page.")]
    async fn crawl(
        &self,
        Parameters(args): Parameters<CrawlArgs>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&self.tools.crawl(&args.urls).await)
    }
}

#[tool_handler]
impl ServerHandler for CrawlServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = SERVER_NAME.to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(server_info)
            .with_instructions(
                "Web crawling tools backed by crawl4ai. Tools: google_search, deep_crawl, crawl.",
            )
    }
}

impl std::fmt::Debug for CrawlServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlServer")
            .field("tools", &self.tools)
            .finish_non_exhaustive()
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string(value)
        .map_err(|e| McpError::internal_error(format!("JSON serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}
