//! # mcpgen_mcp
//!
//! MCP (Model Context Protocol) server for mcpgen.
//!
//! Exposes the generation engine's capabilities as MCP tools over stdio:
//! catalog discovery (`search_tools`, `get_tool_info`), project generation
//! (`generate_server`), and name validation (`validate_project_name`). The
//! server is built as a library crate; `mcpgen_cli` wires it up behind the
//! `serve` subcommand.

pub mod server;
pub mod tools;

use rmcp::ServiceExt;
use rmcp::transport::stdio;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Serve the MCP server over stdio until the client disconnects.
///
/// Stdout carries the protocol; diagnostics must go to stderr only.
pub async fn serve_stdio() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!("starting mcpgen MCP server on stdio");
    let service = server::McpGenServer::new().serve(stdio()).await?;
    service.waiting().await?;
    tracing::info!("mcpgen MCP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
