//! Tool parameter and response types for the mcpgen MCP server.

pub mod requests;
pub mod types;

#[cfg(test)]
mod tests;
