//! Tool catalog index — progressive disclosure over the generator's own
//! capabilities.
//!
//! The catalog is a fixed, read-only registry built once per process. A
//! context-constrained caller discovers capabilities in passes of increasing
//! cost: names only, then summaries, then full entries with use cases and
//! parameters.

use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;

use crate::models::{ToolParameter, TypeTag};

/// One registered capability of the generator itself.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub tool_name: String,
    pub category: String,
    pub short_description: String,
    pub long_description: String,
    pub use_cases: Vec<String>,
    pub parameters: Vec<ToolParameter>,
}

/// Field projection for catalog search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Name,
    Summary,
    Full,
}

/// Field projection for single-entry lookups (`name` is not meaningful for
/// a lookup the caller already made by name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoDetail {
    Summary,
    Full,
}

/// Summary projection of a catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub tool_name: String,
    pub category: String,
    pub short_description: String,
}

/// A catalog entry projected at a requested detail level.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CatalogView {
    Name(String),
    Summary(CatalogSummary),
    Full(CatalogEntry),
}

/// Catalog lookup errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown tool {tool:?} (available: {})", .available.join(", "))]
    UnknownTool { tool: String, available: Vec<String> },
}

fn param(name: &str, type_tag: TypeTag, description: &str, required: bool) -> ToolParameter {
    ToolParameter {
        name: name.to_string(),
        type_tag,
        description: description.to_string(),
        required,
        default: None,
    }
}

fn build_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            tool_name: "search_tools".to_string(),
            category: "discovery".to_string(),
            short_description: "Search for relevant tools by query with progressive disclosure"
                .to_string(),
            long_description: "Search the capability catalog without loading every schema \
                               upfront. Three detail levels are supported: \"name\" returns \
                               tool names only (cheapest), \"summary\" adds categories and \
                               short descriptions, and \"full\" returns complete entries \
                               including use cases and parameters. Matching is a \
                               case-insensitive substring search over names, categories, and \
                               descriptions."
                .to_string(),
            use_cases: vec![
                "Finding tools without loading full schemas".to_string(),
                "Context-efficient capability discovery".to_string(),
                "Searching by keyword or category".to_string(),
            ],
            parameters: vec![
                param("query", TypeTag::String, "Search query; empty returns the full catalog", true),
                param("detail_level", TypeTag::String, "One of name, summary, full", false),
            ],
        },
        CatalogEntry {
            tool_name: "get_tool_info".to_string(),
            category: "discovery".to_string(),
            short_description: "Get information about a specific tool at a chosen detail level"
                .to_string(),
            long_description: "Fetch a single catalog entry by name. \"summary\" returns the \
                               name, category, and short description; \"full\" returns the \
                               complete entry including use cases and parameters. Lets a \
                               caller pull exactly the detail it needs and nothing more."
                .to_string(),
            use_cases: vec![
                "Learning about one tool before calling it".to_string(),
                "Expanding a search hit into full detail".to_string(),
            ],
            parameters: vec![
                param("tool_name", TypeTag::String, "Name of the tool to describe", true),
                param("detail_level", TypeTag::String, "One of summary, full", false),
            ],
        },
        CatalogEntry {
            tool_name: "generate_server".to_string(),
            category: "generation".to_string(),
            short_description: "Generate a complete MCP server project from a declarative tool \
                                list"
                .to_string(),
            long_description: "Generate a production-ready MCP server project: server entry \
                               point, CLI interface, business-logic module with one stub per \
                               declared tool, test suite, documentation, packaging metadata, \
                               and a CI workflow. Tool declarations are validated up front \
                               and statically scanned for risky capabilities; findings are \
                               returned as advisory warnings alongside the generated files."
                .to_string(),
            use_cases: vec![
                "Creating new MCP servers from scratch".to_string(),
                "Scaffolding dual-mode tools (MCP + CLI)".to_string(),
                "Setting up publishable server projects".to_string(),
            ],
            parameters: vec![
                param("project_name", TypeTag::String, "Project name, e.g. my-mcp-server", true),
                param("description", TypeTag::String, "Project description", true),
                param("author", TypeTag::String, "Author name", true),
                param("author_email", TypeTag::String, "Author email", true),
                param("tools", TypeTag::Array, "Tool declarations to generate stubs for", true),
                param("output_dir", TypeTag::String, "Output directory; default current", false),
                param("python_version", TypeTag::String, "Python version; floored to 3.10", false),
                param("prefix", TypeTag::String, "AUTO, NONE, or a custom prefix", false),
            ],
        },
        CatalogEntry {
            tool_name: "validate_project_name".to_string(),
            category: "validation".to_string(),
            short_description: "Validate a project name for package compatibility before \
                                generation"
                .to_string(),
            long_description: "Check a project name against packaging rules: lowercase \
                               alphanumeric with hyphens or underscores, no leading digit, \
                               and no collision with a Python keyword. Use before \
                               generate_server to fail early on a bad name."
                .to_string(),
            use_cases: vec![
                "Checking a name before generation".to_string(),
                "Avoiding keyword conflicts".to_string(),
            ],
            parameters: vec![param("name", TypeTag::String, "Project name to validate", true)],
        },
        CatalogEntry {
            tool_name: "generate_claude_command".to_string(),
            category: "generation".to_string(),
            short_description: "Generate Claude Code command files for guided MCP development"
                .to_string(),
            long_description: "Create slash command files under .claude/commands/ that guide \
                               users through MCP server development: a guided generation \
                               workflow, a best-practices reference, an implementation \
                               helper, or a fully custom prompt."
                .to_string(),
            use_cases: vec![
                "Creating slash commands for Claude Code".to_string(),
                "Setting up project-specific development workflows".to_string(),
                "Providing guided MCP implementation assistance".to_string(),
            ],
            parameters: vec![
                param("command_name", TypeTag::String, "Command name, e.g. mcp-generate", true),
                param(
                    "command_type",
                    TypeTag::String,
                    "One of mcp_generator, best_practices, implementation_helper, custom",
                    false,
                ),
                param("description", TypeTag::String, "Command description; auto-generated if omitted", false),
                param("custom_prompt", TypeTag::String, "Prompt body; required for custom commands", false),
                param("output_dir", TypeTag::String, "Target directory; default .claude/commands", false),
            ],
        },
        CatalogEntry {
            tool_name: "get_best_practices".to_string(),
            category: "guidance".to_string(),
            short_description: "Get MCP server development best practices and recommendations"
                .to_string(),
            long_description: "Retrieve best practices for MCP server development: \
                               progressive disclosure strategies, context-efficient tool \
                               design, control flow optimization, privacy and security, \
                               state management and skills, and testing strategies. Pass a \
                               topic for one practice or omit it for the full set."
                .to_string(),
            use_cases: vec![
                "Learning MCP best practices".to_string(),
                "Understanding progressive disclosure".to_string(),
                "Optimizing tool design".to_string(),
            ],
            parameters: vec![param(
                "topic",
                TypeTag::String,
                "Optional topic, e.g. tool_design or security",
                false,
            )],
        },
        CatalogEntry {
            tool_name: "get_implementation_guide".to_string(),
            category: "guidance".to_string(),
            short_description: "Get a step-by-step guide for implementing MCP servers"
                .to_string(),
            long_description: "Get a step-by-step guide covering project setup, tool \
                               implementation patterns, testing strategies, deployment and \
                               publishing, and Claude Desktop integration. Pass a step for \
                               one section or omit it for the full guide."
                .to_string(),
            use_cases: vec![
                "Planning an MCP server implementation".to_string(),
                "Understanding the implementation workflow".to_string(),
                "Getting started with generated projects".to_string(),
            ],
            parameters: vec![param(
                "step",
                TypeTag::String,
                "Optional step, e.g. setup or deployment",
                false,
            )],
        },
    ]
}

static CATALOG: OnceLock<Vec<CatalogEntry>> = OnceLock::new();

/// The process-wide catalog, built on first access and read-only thereafter.
pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG.get_or_init(build_catalog)
}

/// Registered tool names, in insertion order.
pub fn tool_names() -> Vec<String> {
    catalog().iter().map(|e| e.tool_name.clone()).collect()
}

/// Match strength tier; lower is stronger. `None` means no match.
fn match_rank(entry: &CatalogEntry, query: &str) -> Option<usize> {
    let name = entry.tool_name.to_lowercase();
    if name == query {
        Some(0)
    } else if name.starts_with(query) {
        Some(1)
    } else if name.contains(query) {
        Some(2)
    } else if entry.category.to_lowercase().contains(query) {
        Some(3)
    } else if entry.short_description.to_lowercase().contains(query) {
        Some(4)
    } else {
        None
    }
}

fn project(entry: &CatalogEntry, detail: DetailLevel) -> CatalogView {
    match detail {
        DetailLevel::Name => CatalogView::Name(entry.tool_name.clone()),
        DetailLevel::Summary => CatalogView::Summary(CatalogSummary {
            tool_name: entry.tool_name.clone(),
            category: entry.category.clone(),
            short_description: entry.short_description.clone(),
        }),
        DetailLevel::Full => CatalogView::Full(entry.clone()),
    }
}

/// Search the catalog.
///
/// Results are ranked by match strength (exact name, name prefix, name
/// substring, category, description), with ties broken by catalog insertion
/// order. An empty query returns the full catalog in insertion order.
pub fn search(query: &str, detail: DetailLevel) -> Vec<CatalogView> {
    let query = query.trim().to_lowercase();
    let mut ranked: Vec<(usize, &CatalogEntry)> = if query.is_empty() {
        catalog().iter().map(|e| (0, e)).collect()
    } else {
        catalog()
            .iter()
            .filter_map(|e| match_rank(e, &query).map(|rank| (rank, e)))
            .collect()
    };
    // Stable sort preserves insertion order within a tier.
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked
        .into_iter()
        .map(|(_, entry)| project(entry, detail))
        .collect()
}

/// Look up a single entry by exact tool name.
pub fn get_info(tool_name: &str, detail: InfoDetail) -> Result<CatalogView, CatalogError> {
    let entry = catalog()
        .iter()
        .find(|e| e.tool_name == tool_name)
        .ok_or_else(|| CatalogError::UnknownTool {
            tool: tool_name.to_string(),
            available: tool_names(),
        })?;
    let level = match detail {
        InfoDetail::Summary => DetailLevel::Summary,
        InfoDetail::Full => DetailLevel::Full,
    };
    Ok(project(entry, level))
}
