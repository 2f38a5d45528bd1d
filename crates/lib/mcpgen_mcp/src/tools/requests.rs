//! Parameter types for the mcpgen MCP tools.

use schemars::JsonSchema;
use serde::Deserialize;

use mcpgen_core::catalog::{DetailLevel, InfoDetail};
use mcpgen_core::commands::CommandType;

/// Detail level accepted by `search_tools`.
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchDetail {
    /// Tool names only (most context-efficient).
    Name,
    /// Names, categories, and short descriptions.
    #[default]
    Summary,
    /// Complete entries including use cases and parameters.
    Full,
}

impl From<SearchDetail> for DetailLevel {
    fn from(value: SearchDetail) -> Self {
        match value {
            SearchDetail::Name => DetailLevel::Name,
            SearchDetail::Summary => DetailLevel::Summary,
            SearchDetail::Full => DetailLevel::Full,
        }
    }
}

/// Detail level accepted by `get_tool_info`.
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InfoDetailParam {
    /// Name, category, and short description.
    #[default]
    Summary,
    /// Complete entry including use cases and parameters.
    Full,
}

impl From<InfoDetailParam> for InfoDetail {
    fn from(value: InfoDetailParam) -> Self {
        match value {
            InfoDetailParam::Summary => InfoDetail::Summary,
            InfoDetailParam::Full => InfoDetail::Full,
        }
    }
}

/// Parameters for the `search_tools` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchToolsRequest {
    /// Search query; matches names, categories, and descriptions. Empty
    /// returns the full catalog.
    pub query: String,
    /// Level of detail to return. Defaults to "summary".
    #[serde(default)]
    pub detail_level: SearchDetail,
}

/// Parameters for the `get_tool_info` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetToolInfoRequest {
    /// Name of the tool to describe.
    pub tool_name: String,
    /// Level of detail to return. Defaults to "summary".
    #[serde(default)]
    pub detail_level: InfoDetailParam,
}

/// One declared parameter of a tool the generated server will provide.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ParameterDecl {
    /// Parameter name (valid Python identifier).
    pub name: String,
    /// Parameter type: string, number, boolean, array, or object (common
    /// aliases like "int" or "bool" are accepted).
    #[serde(rename = "type")]
    pub param_type: String,
    /// What the parameter means.
    #[serde(default)]
    pub description: String,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Default value for optional parameters.
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

/// One declared tool the generated server will provide.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ToolDecl {
    /// Tool function name (valid Python identifier).
    pub name: String,
    /// What the tool does.
    #[serde(default)]
    pub description: String,
    /// Parameters the tool accepts.
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
}

/// Parameters for the `generate_server` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateServerRequest {
    /// Project name, e.g. "my-mcp-server".
    pub project_name: String,
    /// Project description.
    pub description: String,
    /// Author name.
    pub author: String,
    /// Author email.
    pub author_email: String,
    /// Tools the generated server will provide.
    pub tools: Vec<ToolDecl>,
    /// Output directory; "." generates in place. Defaults to ".".
    #[serde(default)]
    pub output_dir: Option<String>,
    /// Python version for the generated project; floored to 3.10.
    #[serde(default)]
    pub python_version: Option<String>,
    /// Package prefix: "AUTO" (detect from git), "NONE", or a custom
    /// string. Defaults to "AUTO".
    #[serde(default)]
    pub prefix: Option<String>,
    /// Generate async tool stubs. Defaults to true.
    #[serde(default)]
    pub async_enabled: Option<bool>,
}

/// Parameters for the `validate_project_name` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ValidateProjectNameRequest {
    /// Project name to validate.
    pub name: String,
}

/// Command type accepted by `generate_claude_command`.
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CommandTypeParam {
    /// Guide through the MCP server generation workflow.
    #[default]
    McpGenerator,
    /// Provide an MCP best-practices reference.
    BestPractices,
    /// Help implement a generated MCP server.
    ImplementationHelper,
    /// Use `custom_prompt` for a fully custom command.
    Custom,
}

impl From<CommandTypeParam> for CommandType {
    fn from(value: CommandTypeParam) -> Self {
        match value {
            CommandTypeParam::McpGenerator => CommandType::McpGenerator,
            CommandTypeParam::BestPractices => CommandType::BestPractices,
            CommandTypeParam::ImplementationHelper => CommandType::ImplementationHelper,
            CommandTypeParam::Custom => CommandType::Custom,
        }
    }
}

/// Parameters for the `generate_claude_command` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateClaudeCommandRequest {
    /// Name for the command, e.g. "mcp-generate".
    pub command_name: String,
    /// Kind of command to generate. Defaults to "mcp_generator".
    #[serde(default)]
    pub command_type: CommandTypeParam,
    /// Command description; auto-generated when omitted.
    #[serde(default)]
    pub description: Option<String>,
    /// Prompt body; required when command_type is "custom".
    #[serde(default)]
    pub custom_prompt: Option<String>,
    /// Directory for the command file. Defaults to ".claude/commands".
    #[serde(default)]
    pub output_dir: Option<String>,
}

/// Parameters for the `get_best_practices` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetBestPracticesRequest {
    /// Optional topic, e.g. "tool_design" or "security". Omit for all
    /// practices.
    #[serde(default)]
    pub topic: Option<String>,
}

/// Parameters for the `get_implementation_guide` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetImplementationGuideRequest {
    /// Optional step, e.g. "setup" or "deployment". Omit for the full
    /// guide.
    #[serde(default)]
    pub step: Option<String>,
}
