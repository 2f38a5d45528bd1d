//! MCP server handler — defines the mcpgen MCP server and its tools.

use std::path::Path;

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};

use mcpgen_core::models::{
    PrefixMode, ProjectRequest, ToolParameter, ToolSpec, TypeTag,
};
use mcpgen_core::commands::CommandError;
use mcpgen_core::plan::BuildError;
use mcpgen_core::{catalog, commands, guidance, naming, plan, templates, writer};

use crate::tools::requests::{
    GenerateClaudeCommandRequest, GenerateServerRequest, GetBestPracticesRequest,
    GetImplementationGuideRequest, GetToolInfoRequest, SearchToolsRequest, ToolDecl,
    ValidateProjectNameRequest,
};
use crate::tools::types::{CommandResult, GenerateResult, SearchResult, ValidateResult};

/// mcpgen MCP server handler.
///
/// Stateless apart from the `ToolRouter`; the capability catalog is
/// process-wide and read-only, and every generation request owns its own
/// plan.
#[derive(Clone)]
pub struct McpGenServer {
    tool_router: ToolRouter<Self>,
}

impl Default for McpGenServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to serialize a value to a pretty JSON CallToolResult.
fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn invalid_params(message: impl Into<String>) -> ErrorData {
    ErrorData::new(ErrorCode::INVALID_PARAMS, message.into(), None)
}

/// Convert a wire-level tool declaration into an engine `ToolSpec`,
/// normalizing parameter type aliases.
fn to_tool_spec(decl: ToolDecl) -> Result<ToolSpec, ErrorData> {
    let ToolDecl {
        name,
        description,
        parameters,
    } = decl;
    let parameters = parameters
        .into_iter()
        .map(|p| {
            let type_tag = TypeTag::parse(&p.param_type).ok_or_else(|| {
                invalid_params(format!(
                    "tool {name:?}: unknown parameter type {:?}",
                    p.param_type
                ))
            })?;
            Ok(ToolParameter {
                name: p.name,
                type_tag,
                description: p.description,
                required: p.required,
                default: p.default,
            })
        })
        .collect::<Result<Vec<_>, ErrorData>>()?;
    Ok(ToolSpec {
        name,
        description,
        parameters,
        category: None,
    })
}

#[tool_router]
impl McpGenServer {
    /// Create a new server instance.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Return tool definitions registered in this server.
    #[cfg(test)]
    pub(crate) fn list_tools() -> Vec<rmcp::model::Tool> {
        Self::tool_router().list_all()
    }

    /// Search the capability catalog with progressive disclosure.
    #[tool(description = "Search for relevant tools by query with progressive disclosure")]
    fn search_tools(
        &self,
        Parameters(SearchToolsRequest {
            query,
            detail_level,
        }): Parameters<SearchToolsRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let matches = catalog::search(&query, detail_level.into());
        let result = SearchResult {
            query,
            detail_level: format!("{detail_level:?}").to_lowercase(),
            count: matches.len(),
            matches,
        };
        json_result(&result)
    }

    /// Describe a single catalog entry at a chosen detail level.
    #[tool(description = "Get information about a specific tool with configurable detail levels")]
    fn get_tool_info(
        &self,
        Parameters(GetToolInfoRequest {
            tool_name,
            detail_level,
        }): Parameters<GetToolInfoRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let view = catalog::get_info(&tool_name, detail_level.into())
            .map_err(|e| invalid_params(e.to_string()))?;
        json_result(&view)
    }

    /// Generate a complete MCP server project and write it to disk.
    #[tool(
        description = "Generate a complete MCP server project with dual-mode (MCP + CLI) architecture"
    )]
    fn generate_server(
        &self,
        Parameters(request): Parameters<GenerateServerRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let tools = request
            .tools
            .into_iter()
            .map(to_tool_spec)
            .collect::<Result<Vec<_>, ErrorData>>()?;

        let (prefix_mode, custom_prefix) =
            PrefixMode::parse_flag(request.prefix.as_deref().unwrap_or("AUTO"));

        let project_request = ProjectRequest {
            project_name: request.project_name,
            description: request.description,
            author: request.author,
            email: request.author_email,
            tools,
            prefix_mode,
            custom_prefix,
            async_enabled: request.async_enabled.unwrap_or(true),
            python_version: request.python_version,
        };

        let generation_plan = plan::build(
            &project_request,
            &mcpgen_core::identity::GitIdentity,
            &templates::BuiltinTemplates,
        )
        .map_err(|e| match e {
            BuildError::Render(_) => ErrorData::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None),
            _ => invalid_params(e.to_string()),
        })?;

        // "." means in-place generation; anything else gets a project
        // subdirectory named after the normalized project name.
        let output_dir = request.output_dir.as_deref().unwrap_or(".");
        let project_dir = if output_dir == "." {
            None
        } else {
            Some(naming::normalize(&project_request.project_name))
        };
        let report = writer::write_plan(
            &generation_plan,
            Path::new(output_dir),
            project_dir.as_deref(),
        )
        .map_err(|e| match e {
            writer::WriteError::Io(_) => {
                ErrorData::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None)
            }
            _ => invalid_params(e.to_string()),
        })?;

        tracing::info!(
            project_path = %report.project_path.display(),
            files = report.files_created.len(),
            "generated MCP server project"
        );

        let result = GenerateResult {
            success: true,
            project_path: report.project_path.display().to_string(),
            files_created: report.files_created,
            files_merged: report.files_merged,
            warnings: generation_plan.warnings,
            notices: generation_plan.notices,
        };
        json_result(&result)
    }

    /// Create a Claude Code slash command file for guided MCP development.
    #[tool(
        description = "Generate Claude Code command files (.claude/commands/*.md) for guiding MCP development"
    )]
    fn generate_claude_command(
        &self,
        Parameters(request): Parameters<GenerateClaudeCommandRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let output_dir = request.output_dir.as_deref().unwrap_or(".claude/commands");
        let report = commands::write_command(
            &request.command_name,
            request.command_type.into(),
            request.description.as_deref(),
            request.custom_prompt.as_deref(),
            Path::new(output_dir),
        )
        .map_err(|e| match e {
            CommandError::Io(_) => ErrorData::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None),
            CommandError::MissingCustomPrompt => invalid_params(e.to_string()),
        })?;

        tracing::info!(
            file_path = %report.file_path.display(),
            "generated Claude command file"
        );

        let result = CommandResult {
            success: true,
            command_name: report.command_name,
            command_type: report.command_type,
            file_path: report.file_path.display().to_string(),
            usage: report.usage,
            description: report.description,
        };
        json_result(&result)
    }

    /// Look up development best practices, optionally for one topic.
    #[tool(description = "Get MCP server development best practices and recommendations")]
    fn get_best_practices(
        &self,
        Parameters(GetBestPracticesRequest { topic }): Parameters<GetBestPracticesRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let practices = guidance::best_practices(topic.as_deref())
            .map_err(|e| invalid_params(e.to_string()))?;
        json_result(&practices)
    }

    /// Look up the implementation guide, optionally for one step.
    #[tool(description = "Get step-by-step guide for implementing MCP servers")]
    fn get_implementation_guide(
        &self,
        Parameters(GetImplementationGuideRequest { step }): Parameters<GetImplementationGuideRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let guide = guidance::implementation_guide(step.as_deref())
            .map_err(|e| invalid_params(e.to_string()))?;
        json_result(&guide)
    }

    /// Validate a project name against packaging rules.
    #[tool(description = "Validate a project name for package compatibility")]
    fn validate_project_name(
        &self,
        Parameters(ValidateProjectNameRequest { name }): Parameters<ValidateProjectNameRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = match naming::validate_project_name(&name) {
            Ok(()) => ValidateResult {
                name,
                valid: true,
                reason: None,
            },
            Err(e) => ValidateResult {
                name,
                valid: false,
                reason: Some(e.to_string()),
            },
        };
        json_result(&result)
    }
}

#[tool_handler]
impl ServerHandler for McpGenServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "mcpgen — generates complete MCP server projects from a declarative tool list. \
                 Start with search_tools or get_tool_info to discover capabilities, \
                 validate_project_name to check a name, then generate_server to scaffold. \
                 get_best_practices and get_implementation_guide provide development \
                 guidance, and generate_claude_command creates Claude Code slash commands \
                 for guided workflows."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
