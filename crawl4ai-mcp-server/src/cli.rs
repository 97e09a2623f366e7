//! Command-line arguments.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// Channel the MCP server speaks over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC frames on stdin and stdout.
    #[default]
    Stdio,
    /// Streamable HTTP.
    #[value(alias = "html")]
    Http,
}

/// Serve crawl4ai-backed search and crawl tools over MCP.
///
/// Crawler settings come from `C4AI_*` environment variables.
#[derive(Debug, Parser)]
#[command(name = "crawl4ai-mcp", version, about)]
pub struct Cli {
    /// Transport to serve on.
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// Listen address for the HTTP transport.
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["crawl4ai-mcp"]).unwrap();
        assert_eq!(cli.transport, Transport::Stdio);
        assert_eq!(cli.bind, "127.0.0.1:8000".parse::<SocketAddr>().unwrap());
        assert!(!cli.log_json);
    }

    #[test]
    fn test_http_transport() {
        let cli = Cli::try_parse_from(["crawl4ai-mcp", "--transport", "http", "--bind", "0.0.0.0:9000"])
            .unwrap();
        assert_eq!(cli.transport, Transport::Http);
        assert_eq!(cli.bind.port(), 9000);
    }

    #[test]
    fn test_html_is_alias_for_http() {
        let cli = Cli::try_parse_from(["crawl4ai-mcp", "--transport", "html"]).unwrap();
        assert_eq!(cli.transport, Transport::Http);
    }

    #[test]
    fn test_unknown_transport_rejected() {
        assert!(Cli::try_parse_from(["crawl4ai-mcp", "--transport", "sse"]).is_err());
    }
}
