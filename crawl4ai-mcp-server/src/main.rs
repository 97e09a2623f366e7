//! crawl4ai MCP server entry point.

mod cli;
mod transport;

use anyhow::{Context, Result};
use clap::Parser;
use crawl4ai_mcp::config::Settings;
use crawl4ai_mcp::crawler::Crawl4aiClient;
use crawl4ai_mcp::observability::{init_logging, LogFormat};
use crawl4ai_mcp::server::CrawlServer;
use crawl4ai_mcp::tools::CrawlTools;
use std::sync::Arc;
use tracing::info;

use cli::{Cli, Transport};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().context("invalid C4AI_* configuration")?;

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_logging(settings.verbose, format)?;

    let client = Crawl4aiClient::from_settings(&settings)?;
    info!(
        crawler = client.base_url(),
        transport = ?cli.transport,
        content_type = %settings.content_type,
        "Starting crawl4ai MCP server"
    );

    let tools = CrawlTools::new(Arc::new(settings), Arc::new(client));
    let server = CrawlServer::new(tools);

    match cli.transport {
        Transport::Stdio => transport::serve_stdio(server).await,
        Transport::Http => transport::serve_http(server, cli.bind).await,
    }
}
