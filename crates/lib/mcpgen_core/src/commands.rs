//! Claude Code command files — slash commands that guide MCP development.
//!
//! Renders a command file (YAML frontmatter plus a prompt body) from a fixed
//! template per command type, or from a caller-supplied prompt for custom
//! commands, and writes it under `.claude/commands/`.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The kind of command file to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    McpGenerator,
    BestPractices,
    ImplementationHelper,
    Custom,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::McpGenerator => "mcp_generator",
            Self::BestPractices => "best_practices",
            Self::ImplementationHelper => "implementation_helper",
            Self::Custom => "custom",
        }
    }
}

/// Command generation errors.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("custom_prompt is required when command_type is \"custom\"")]
    MissingCustomPrompt,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of writing a command file.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CommandReport {
    pub command_name: String,
    pub command_type: String,
    pub file_path: PathBuf,
    pub usage: String,
    pub description: String,
}

struct CommandTemplate {
    description: &'static str,
    prompt: &'static str,
}

const MCP_GENERATOR_PROMPT: &str = "\
You are helping the user generate a new MCP (Model Context Protocol) server.

Follow this guided workflow:

1. Understand the goal: ask what functionality the server should provide,
   clarify its tools, and discuss use cases.
2. Gather project information: project name (lowercase, hyphen-separated),
   description, author name and email, and the desired prefix (AUTO for the
   git identity, NONE, or a custom string).
3. Define tools: for each tool collect a name (valid Python identifier), a
   description, and parameters (name, type, description, required). Use
   search_tools to check whether similar tools exist for reference.
4. Validate and generate: use validate_project_name to check the name, use
   get_best_practices with topic \"tool_design\" for design guidance, then
   call generate_server with the collected information.
5. Next steps: after generation, use get_implementation_guide to show how to
   implement the TODO stubs, run the tests, deploy to PyPI, and integrate
   with Claude Desktop.

Follow progressive disclosure: ask questions incrementally and provide
guidance at each step rather than presenting every option at once.
";

const BEST_PRACTICES_PROMPT: &str = "\
You are providing MCP server development best practices and guidance.

1. Discover best practices: use get_best_practices to list the available
   topics, and get_best_practices with a specific topic for focused
   guidance. Explain practices in the context of the user's questions.
2. Key topics: progressive disclosure, context-efficient tool design,
   control flow optimization, security and privacy, state management and
   skills, and testing strategies.
3. Practical application: relate practices to the user's specific server,
   provide examples, and suggest improvements to existing implementations.
4. Implementation guidance: use get_implementation_guide for step-by-step
   workflows, help troubleshoot issues, and guide testing and deployment.

Focus on practical, actionable advice.
";

const IMPLEMENTATION_HELPER_PROMPT: &str = "\
You are helping the user implement their generated MCP server.

1. Implementation: help implement the TODO stubs in generator.py, suggest
   async patterns for I/O, review tool implementations, and add proper
   error handling and validation.
2. Guidance: use get_best_practices for design patterns,
   get_implementation_guide for workflow steps, and search_tools to find
   relevant examples.
3. Testing: help write and run tests, explain failures and fixes, and guide
   pytest and coverage usage.
4. Optimization: identify opportunities for progressive disclosure,
   context-efficient filtering, and control flow improvements; review
   security and privacy considerations.
5. Deployment: guide PyPI publishing, GitHub Actions configuration, and
   Claude Desktop integration.

Be proactive in suggesting improvements that make the server
production-ready, well-tested, and efficient.
";

const MCP_GENERATOR: CommandTemplate = CommandTemplate {
    description: "Generate a new MCP server with guided workflow",
    prompt: MCP_GENERATOR_PROMPT,
};

const BEST_PRACTICES: CommandTemplate = CommandTemplate {
    description: "Get MCP server development best practices and guidance",
    prompt: BEST_PRACTICES_PROMPT,
};

const IMPLEMENTATION_HELPER: CommandTemplate = CommandTemplate {
    description: "Help implement and improve generated MCP servers",
    prompt: IMPLEMENTATION_HELPER_PROMPT,
};

fn template(command_type: CommandType) -> Option<&'static CommandTemplate> {
    match command_type {
        CommandType::McpGenerator => Some(&MCP_GENERATOR),
        CommandType::BestPractices => Some(&BEST_PRACTICES),
        CommandType::ImplementationHelper => Some(&IMPLEMENTATION_HELPER),
        CommandType::Custom => None,
    }
}

/// Render the command file body and resolve the effective description.
pub fn render_command(
    command_name: &str,
    command_type: CommandType,
    description: Option<&str>,
    custom_prompt: Option<&str>,
) -> Result<(String, String), CommandError> {
    let (prompt, default_description) = match template(command_type) {
        Some(t) => (t.prompt.to_string(), t.description.to_string()),
        None => {
            let prompt = custom_prompt
                .filter(|p| !p.trim().is_empty())
                .ok_or(CommandError::MissingCustomPrompt)?;
            (
                prompt.to_string(),
                format!("Custom Claude Code command: {command_name}"),
            )
        }
    };
    let description = description
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
        .unwrap_or(default_description);
    let content = format!("---\ndescription: {description}\n---\n\n{prompt}");
    Ok((content, description))
}

/// Write a command file to `output_dir/<command_name>.md`, creating the
/// directory as needed. Existing files are overwritten.
pub fn write_command(
    command_name: &str,
    command_type: CommandType,
    description: Option<&str>,
    custom_prompt: Option<&str>,
    output_dir: &Path,
) -> Result<CommandReport, CommandError> {
    let (content, description) =
        render_command(command_name, command_type, description, custom_prompt)?;
    std::fs::create_dir_all(output_dir)?;
    let file_path = output_dir.join(format!("{command_name}.md"));
    std::fs::write(&file_path, content)?;
    Ok(CommandReport {
        command_name: command_name.to_string(),
        command_type: command_type.as_str().to_string(),
        usage: format!("/{command_name}"),
        file_path,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_frontmatter_and_prompt() {
        let (content, description) =
            render_command("mcp-generate", CommandType::McpGenerator, None, None)
                .expect("render");
        assert!(content.starts_with("---\ndescription: "));
        assert!(content.contains("generate_server"));
        assert!(content.contains("validate_project_name"));
        assert_eq!(description, "Generate a new MCP server with guided workflow");
    }

    #[test]
    fn explicit_description_overrides_template_default() {
        let (content, description) = render_command(
            "mcp-help",
            CommandType::BestPractices,
            Some("My own description"),
            None,
        )
        .expect("render");
        assert_eq!(description, "My own description");
        assert!(content.contains("description: My own description"));
    }

    #[test]
    fn custom_type_requires_a_prompt() {
        let err = render_command("my-cmd", CommandType::Custom, None, None)
            .expect_err("should fail");
        assert!(matches!(err, CommandError::MissingCustomPrompt));

        let (content, description) =
            render_command("my-cmd", CommandType::Custom, None, Some("Do the thing."))
                .expect("render");
        assert!(content.ends_with("Do the thing."));
        assert_eq!(description, "Custom Claude Code command: my-cmd");
    }

    #[test]
    fn writes_command_file_under_output_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let commands_dir = dir.path().join(".claude/commands");
        let report = write_command(
            "mcp-generate",
            CommandType::McpGenerator,
            None,
            None,
            &commands_dir,
        )
        .expect("write");

        assert_eq!(report.usage, "/mcp-generate");
        assert_eq!(report.command_type, "mcp_generator");
        assert_eq!(report.file_path, commands_dir.join("mcp-generate.md"));
        let content = std::fs::read_to_string(&report.file_path).expect("read");
        assert!(content.starts_with("---\n"));
    }
}
