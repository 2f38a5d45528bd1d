//! Response types for the mcpgen MCP tools.

use serde::Serialize;

use mcpgen_core::catalog::CatalogView;
use mcpgen_core::models::RiskFinding;

/// Result of a `search_tools` call.
#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub query: String,
    pub detail_level: String,
    pub matches: Vec<CatalogView>,
    pub count: usize,
}

/// Result of a `generate_server` call.
#[derive(Debug, Serialize)]
pub struct GenerateResult {
    pub success: bool,
    pub project_path: String,
    pub files_created: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files_merged: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RiskFinding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<String>,
}

/// Result of a `generate_claude_command` call.
#[derive(Debug, Serialize)]
pub struct CommandResult {
    pub success: bool,
    pub command_name: String,
    pub command_type: String,
    pub file_path: String,
    pub usage: String,
    pub description: String,
}

/// Result of a `validate_project_name` call.
#[derive(Debug, Serialize)]
pub struct ValidateResult {
    pub name: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
