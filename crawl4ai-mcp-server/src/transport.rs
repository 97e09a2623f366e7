//! Serving the MCP handler over stdio or streamable HTTP.

use anyhow::Result;
use axum::{routing::get, Router};
use crawl4ai_mcp::server::CrawlServer;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use rmcp::ServiceExt;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Path the MCP endpoint is mounted at.
pub const MCP_PATH: &str = "/mcp";

/// Serves on stdin and stdout until the client disconnects.
pub async fn serve_stdio(server: CrawlServer) -> Result<()> {
    info!("Serving MCP over stdio");
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    info!("Client disconnected");
    Ok(())
}

/// Serves streamable HTTP on `bind` until Ctrl-C.
pub async fn serve_http(server: CrawlServer, bind: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, path = MCP_PATH, "Serving MCP over streamable HTTP");

    axum::serve(listener, http_router(server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

/// Routes for the HTTP transport: the MCP endpoint and a liveness probe.
pub fn http_router(server: CrawlServer) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    Router::new()
        .nest_service(MCP_PATH, service)
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "Cannot listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
